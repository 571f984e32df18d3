//! Defines the interface to inference engines

use factor::Factor;
use super::Result;

use indexmap::IndexMap;

mod ordering;
mod variable_elimination;

pub use self::ordering::{elimination_order, EliminationOrder, Heuristic};
pub use self::variable_elimination::{posterior, VariableEliminationEngine};


/// Observed values, as a mapping from variable name to value literal
pub type Evidence = IndexMap<String, String>;


/// Identifies a `Factor` in the working set of an inference task
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FactorKey {
    /// The (possibly evidence-reduced) CPT of the named variable
    Cpt(String),

    /// The `Factor` produced by eliminating the named variable
    Reduced(String)
}

/// The working set of `Factor`s an inference engine combines and eliminates
pub type FactorSet = IndexMap<FactorKey, Factor>;


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///     ```P(Y | E = e)```
pub trait ConditionalInferenceEngine {

    /// Infer the distribution ```P(query | evidence)```
    fn infer(&mut self, query: &str, evidence: &Evidence) -> Result<Factor>;

}
