//! Defines a `BayesianNetwork`, a directed model that represents the factorization of a
//! probability distribution P over discrete `Variable`s.

use factor::Factor;
use init::Initialization;
use util::{VarElimError, Result};
use variable::Variable;

use indexmap::IndexMap;


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// The network is represented as a Directed Acyclic Graph (DAG). The edges are held as the list
/// of parents of each node; the conditional probability table (CPT) of a node ```X``` has scope
/// ```Pa(X) U X```. Nodes are held in their topological order.
///
/// A `BayesianNetwork` is never modified by inference. Engines that need to condition it on
/// evidence work on their own copies of the CPTs.
#[derive(Clone, Debug, Default)]
pub struct BayesianNetwork {

    /// The `Variable`s of the network, keyed by name
    variables: IndexMap<String, Variable>,

    /// The names of the parents of each node
    parents: IndexMap<String, Vec<String>>,

    /// The CPT of each node
    cpts: IndexMap<String, Factor>

}

impl BayesianNetwork {

    /// Get the names of the nodes in topological order
    pub fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.variables.keys().map(|k| k.as_str())
    }

    /// Get the number of nodes in the network
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Check if a node with the given name is part of the network
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Lookup a `Variable` in the network based on the name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Get the ordered values of the node with the given name
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.variables.get(name).map(|v| v.values())
    }

    /// Get the names of the parents of a node
    pub fn parents(&self, name: &str) -> Option<&[String]> {
        self.parents.get(name).map(|p| p.as_slice())
    }

    /// Get the names of the nodes that list `name` as a parent
    pub fn children(&self, name: &str) -> Vec<&str> {
        self.parents.iter()
                    .filter(|&(_, ps)| ps.iter().any(|p| p == name))
                    .map(|(child, _)| child.as_str())
                    .collect()
    }

    /// Get the CPT of a node
    pub fn cpt(&self, name: &str) -> Option<&Factor> {
        self.cpts.get(name)
    }

    /// Iterate over every node and its CPT
    pub fn cpts<'a>(&'a self) -> impl Iterator<Item = (&'a str, &'a Factor)> + 'a {
        self.cpts.iter().map(|(k, f)| (k.as_str(), f))
    }
}


/// An implementation of the [builder pattern] for creating a `BayesianNetwork`.
///
/// Networks must be assembled in topological order: the parents of a node have to be added
/// before the node itself.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
#[derive(Default)]
pub struct BayesianNetworkBuilder {

    /// The network under construction
    network: BayesianNetwork,

    /// The error state of the builder
    err: Option<VarElimError>

}

impl BayesianNetworkBuilder {

    /// Construct a new `BayesianNetworkBuilder` representing an empty `BayesianNetwork`
    pub fn new() -> Self {
        BayesianNetworkBuilder::default()
    }


    /// Add a `Variable` to the network.
    ///
    /// # Args
    /// * `var`: the variable to add to the network
    /// * `parents`: the names of the parent variables. The parents must already be in the
    ///   network. Their order is the axis order of the CPT.
    /// * `init`: the initialization mechanism for the CPT of `var`.
    pub fn with_variable(mut self, var: &Variable, parents: &[&str], init: Initialization) -> Self {
        if self.err.is_none() {
            if let Err(e) = self.add_variable(var, parents, init) {
                self.err = Some(e);
            }
        }

        self
    }


    /// Complete building the network.
    ///
    /// # Returns
    /// the `BayesianNetwork`, or the first error generated during the building process
    pub fn build(self) -> Result<BayesianNetwork> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(self.network)
        }
    }


    /// Internal function that actually does the variable addition to the network
    fn add_variable(&mut self, var: &Variable, parents: &[&str], init: Initialization) -> Result<()> {
        let name = var.name();
        if self.network.contains(name) {
            return Err(VarElimError::DuplicateVariable(String::from(name)));
        }

        let mut scope = Vec::with_capacity(parents.len());
        for &p in parents.iter() {
            match self.network.variable(p) {
                Some(v) => scope.push(v.clone()),
                None => return Err(VarElimError::MissingParent(String::from(p)))
            }
        }

        let cpt = init.build_cpd(var, &scope)?;

        self.network.variables.insert(String::from(name), var.clone());
        self.network.parents.insert(String::from(name), parents.iter().map(|p| String::from(*p)).collect());
        self.network.cpts.insert(String::from(name), cpt);

        Ok(())
    }

}
