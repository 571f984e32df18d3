//! Defines a `ConditionalInferenceEngine` that uses exact inference by variable elimination to
//! answer conditional inference queries.
//!
//! Implementation of Koller & Friedman Algorithm 9.1 - Sum-Product-VE

use factor::Factor;
use network::BayesianNetwork;
use util::{VarElimError, Result};
use variable::Assignment;
use super::{ConditionalInferenceEngine, EliminationOrder, Evidence, FactorKey, FactorSet};

use itertools::Itertools;
use rand::{self, Rng, ThreadRng};


pub struct VariableEliminationEngine<'a, R: Rng = ThreadRng> {

    /// the network to answer queries on. It is never modified; each query conditions its own copy
    /// of the CPTs.
    network: &'a BayesianNetwork,

    /// how the elimination order is determined
    order: EliminationOrder,

    /// randomness for the random ordering heuristics
    rng: R

}


impl<'a> VariableEliminationEngine<'a, ThreadRng> {

    pub fn new(network: &'a BayesianNetwork, order: EliminationOrder) -> Self {
        VariableEliminationEngine::with_rng(network, order, rand::thread_rng())
    }

}


impl<'a, R: Rng> VariableEliminationEngine<'a, R> {

    /// Construct an engine drawing random orderings from `rng`
    pub fn with_rng(network: &'a BayesianNetwork, order: EliminationOrder, rng: R) -> Self {
        VariableEliminationEngine { network, order, rng }
    }

    pub fn order(&self) -> &EliminationOrder {
        &self.order
    }

    /// Validate the query and evidence against the network, translating the evidence into value
    /// indices
    fn observe(&self, query: &str, evidence: &Evidence) -> Result<Assignment> {
        if ! self.network.contains(query) {
            return Err(VarElimError::InvalidQuery(String::from(query)));
        }

        let mut observed = Assignment::new();
        for (name, value) in evidence.iter() {
            let idx = self.network.variable(name)
                                  .and_then(|v| v.index_of(value))
                                  .ok_or_else(|| VarElimError::InvalidEvidence(name.clone(), value.clone()))?;
            observed.set(name, idx);
        }

        Ok(observed)
    }

    /// Copy the CPTs of the network, reduced by the observed values
    fn condition(&self, observed: &Assignment) -> FactorSet {
        self.network.cpts()
                    .map(|(name, cpt)| (FactorKey::Cpt(String::from(name)), cpt.reduce(observed)))
                    .collect()
    }

}


impl<'a, R: Rng> ConditionalInferenceEngine for VariableEliminationEngine<'a, R> {

    fn infer(&mut self, query: &str, evidence: &Evidence) -> Result<Factor> {
        if self.network.is_empty() {
            return Err(VarElimError::NoFactors);
        }

        let observed = self.observe(query, evidence)?;

        // reduce the CPTs with the evidence - these are the factors we will eliminate from
        let mut phis = self.condition(&observed);

        // we are computing P(query | e), so never eliminate the query
        let order: Vec<String> = self.order.resolve(self.network, &observed, &phis, &mut self.rng)?
                                           .into_iter()
                                           .filter(|v| v != query)
                                           .collect();
        debug!("elimination order for P({}): {}", query, order.iter().join(", "));

        for var in order.into_iter() {
            let (phi_1prime, phi_2prime): (FactorSet, FactorSet) = phis.into_iter()
                                                                       .partition(|&(_, ref f)| f.contains(&var));
            phis = phi_2prime;

            if phi_1prime.is_empty() {
                // already eliminated along with another variable
                continue;
            }

            // product step - multiply factors with var
            let psi = phi_1prime.values().fold(Factor::identity(), |acc, phi| acc.product(phi));
            trace!("eliminating {}: {} factors, {} rows", var, phi_1prime.len(), psi.len());

            // sum step - marginalize psi over var
            let tau = psi.marginalize(&var);
            phis.insert(FactorKey::Reduced(var), tau);
        }

        if phis.is_empty() {
            return Err(VarElimError::NoFactors);
        }

        // multiply together remaining phis
        let mut phi_star = phis.values().fold(Factor::identity(), |acc, phi| acc.product(phi));

        // anything left besides the query is either observed or was missing from the order
        let residual: Vec<String> = phi_star.scope()
                                            .iter()
                                            .map(|v| String::from(v.name()))
                                            .filter(|v| v != query)
                                            .collect();
        for var in residual.iter() {
            phi_star = match observed.get(var) {
                Some(idx) => {
                    let mut assn = Assignment::new();
                    assn.set(var, idx);
                    phi_star.reduce(&assn)
                },
                None => phi_star.marginalize(var)
            };
        }

        // an observed query was reduced away with the rest of the evidence
        if let (Some(idx), Some(var)) = (observed.get(query), self.network.variable(query)) {
            if ! phi_star.contains(query) {
                phi_star = phi_star.product(&Factor::indicator(var, idx));
            }
        }

        // now we have an unnormalized distribution. We need the partition function to return a
        // conditional probability.
        let result = phi_star.normalize()?;
        debug!("P({} | {}):\n{}", query, evidence.iter().map(|(k, v)| format!("{}={}", k, v)).join(", "), result);

        Ok(result)
    }

}


/// Compute the posterior distribution ```P(query | evidence)``` of a network by variable
/// elimination.
///
/// # Args
/// * `network`: the network to query
/// * `query`: the name of the query variable
/// * `evidence`: the observed variables, possibly empty
/// * `order`: a heuristic name (e.g. `"min-size"`), a `Heuristic`, or an explicit ordering
///
/// # Returns
/// a `Factor` over the query variable whose values sum to 1
pub fn posterior<O>(
    network: &BayesianNetwork,
    query: &str,
    evidence: &Evidence,
    order: O
) -> Result<Factor>
    where O: Into<EliminationOrder>
{
    VariableEliminationEngine::new(network, order.into()).infer(query, evidence)
}
