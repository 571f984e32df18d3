//! Elimination orderings for variable elimination.
//!
//! The heuristics are greedy: at every step each remaining candidate is scored and the best one
//! is appended to the order. There is no backtracking.

use network::BayesianNetwork;
use util::{VarElimError, Result};
use variable::Assignment;
use super::FactorSet;

use itertools::Itertools;
use rand::Rng;
use rand::distributions::{IndependentSample, Range};

use std::fmt;


/// A greedy elimination ordering heuristic
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Pick a remaining variable uniformly at random
    Random,

    /// Smallest CPT first, counting the rows of each variable's original CPT
    MinSize,

    /// Same ranking as `MinSize`
    MinWeight,

    /// Fewest parents first
    LeastIncomingArcs,

    /// Most children first
    OutgoingArcsFirst,

    /// Appears in the fewest factors of the (evidence reduced) working set first
    FewestFactors,

    /// A heuristic name that is not recognized. Orders uniformly at random.
    Unrecognized(String)
}

/// Which extremum of the score a `Heuristic` picks
enum Pick {
    Min,
    Max
}

impl Heuristic {

    /// The name of the `Heuristic`, as accepted by `Heuristic::from`
    pub fn name(&self) -> &str {
        match self {
            &Heuristic::Random => "random",
            &Heuristic::MinSize => "min-size",
            &Heuristic::MinWeight => "min-weight",
            &Heuristic::LeastIncomingArcs => "least-incoming-arcs",
            &Heuristic::OutgoingArcsFirst => "outgoing-arcs-first",
            &Heuristic::FewestFactors => "fewest-factors",
            &Heuristic::Unrecognized(ref name) => name.as_str()
        }
    }

    /// `None` for the heuristics that choose at random
    fn pick(&self) -> Option<Pick> {
        match self {
            &Heuristic::MinSize
            | &Heuristic::MinWeight
            | &Heuristic::LeastIncomingArcs
            | &Heuristic::FewestFactors => Some(Pick::Min),
            &Heuristic::OutgoingArcsFirst => Some(Pick::Max),
            &Heuristic::Random | &Heuristic::Unrecognized(_) => None
        }
    }

    /// Score the variable named `var`
    fn score(&self, var: &str, network: &BayesianNetwork, factors: &FactorSet) -> usize {
        match self {
            &Heuristic::MinSize | &Heuristic::MinWeight => {
                network.cpt(var).map(|f| f.len()).unwrap_or(0)
            },
            &Heuristic::LeastIncomingArcs => {
                network.parents(var).map(|p| p.len()).unwrap_or(0)
            },
            &Heuristic::OutgoingArcsFirst => network.children(var).len(),
            &Heuristic::FewestFactors => factors.values().filter(|f| f.contains(var)).count(),
            &Heuristic::Random | &Heuristic::Unrecognized(_) => 0
        }
    }
}

impl<'a> From<&'a str> for Heuristic {

    fn from(name: &'a str) -> Self {
        match name {
            "random" => Heuristic::Random,
            "min-size" => Heuristic::MinSize,
            "min-weight" => Heuristic::MinWeight,
            "least-incoming-arcs" => Heuristic::LeastIncomingArcs,
            "outgoing-arcs-first" => Heuristic::OutgoingArcsFirst,
            "fewest-factors" => Heuristic::FewestFactors,
            other => Heuristic::Unrecognized(String::from(other))
        }
    }

}

impl fmt::Display for Heuristic {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }

}


/// Compute an elimination ordering of every network node that is not observed.
///
/// # Args
/// * `heuristic`: the greedy selection rule
/// * `network`: the network whose nodes are ordered. Static heuristics score against its
///   CPTs and structure.
/// * `observed`: the evidence; observed variables are left out of the ordering
/// * `factors`: the working set of factors, scored against by `Heuristic::FewestFactors`
/// * `rng`: source of randomness for the random heuristics
pub fn elimination_order<R: Rng>(
    heuristic: &Heuristic,
    network: &BayesianNetwork,
    observed: &Assignment,
    factors: &FactorSet,
    rng: &mut R
) -> Vec<String> {
    let mut remaining: Vec<&str> = network.nodes().filter(|v| ! observed.contains(v)).collect();
    let mut order = Vec::with_capacity(remaining.len());

    while ! remaining.is_empty() {
        let scored = remaining.iter().enumerate();
        let idx = match heuristic.pick() {
            None => Some(Range::new(0, remaining.len()).ind_sample(rng)),
            Some(Pick::Min) => {
                scored.min_by_key(|&(_, v)| heuristic.score(v, network, factors)).map(|(i, _)| i)
            },
            Some(Pick::Max) => {
                scored.max_by_key(|&(_, v)| heuristic.score(v, network, factors)).map(|(i, _)| i)
            }
        };

        // remaining is non-empty, so there is always a pick
        if let Some(i) = idx {
            order.push(String::from(remaining.remove(i)));
        }
    }

    trace!("{} ordering: {}", heuristic, order.iter().join(", "));
    order
}


/// How the elimination order of an inference task is determined
#[derive(Clone, Debug, PartialEq)]
pub enum EliminationOrder {
    /// Compute the order with a `Heuristic`
    Heuristic(Heuristic),

    /// Use the given order as is
    Explicit(Vec<String>)
}

impl EliminationOrder {

    /// Resolve to a concrete ordering of the unobserved variables.
    ///
    /// An explicit ordering keeps the first occurrence of each variable and drops observed ones.
    /// It does not need to name every variable.
    ///
    /// # Errors
    /// * `VarElimError::InvalidOrdering`, if an explicit ordering names a variable that is not
    ///   in the network
    pub fn resolve<R: Rng>(
        &self,
        network: &BayesianNetwork,
        observed: &Assignment,
        factors: &FactorSet,
        rng: &mut R
    ) -> Result<Vec<String>> {
        match self {
            &EliminationOrder::Heuristic(ref h) => {
                Ok(elimination_order(h, network, observed, factors, rng))
            },
            &EliminationOrder::Explicit(ref vars) => {
                if let Some(v) = vars.iter().find(|v| ! network.contains(v)) {
                    return Err(VarElimError::InvalidOrdering(v.clone()));
                }

                Ok(vars.iter().unique().filter(|v| ! observed.contains(v)).cloned().collect())
            }
        }
    }

}

impl From<Heuristic> for EliminationOrder {

    fn from(h: Heuristic) -> Self {
        EliminationOrder::Heuristic(h)
    }

}

impl<'a> From<&'a str> for EliminationOrder {

    fn from(name: &'a str) -> Self {
        EliminationOrder::Heuristic(Heuristic::from(name))
    }

}

impl<'a> From<Vec<&'a str>> for EliminationOrder {

    fn from(vars: Vec<&'a str>) -> Self {
        EliminationOrder::Explicit(vars.into_iter().map(String::from).collect())
    }

}

impl From<Vec<String>> for EliminationOrder {

    fn from(vars: Vec<String>) -> Self {
        EliminationOrder::Explicit(vars)
    }

}
