//! Exact inference on discrete Bayesian Networks by variable elimination.
//!
//! A `BayesianNetwork` is assembled with a `BayesianNetworkBuilder`; `posterior` (or a
//! `VariableEliminationEngine`) then answers queries of the form ```P(Y | E = e)```.

extern crate indexmap;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
#[macro_use]
extern crate ndarray;
extern crate ndarray_rand;
extern crate rand;

pub mod variable;
pub mod factor;
pub mod init;
pub mod network;
pub mod inference;
pub mod util;

pub use util::{Result, VarElimError};
pub use variable::{Assignment, Variable};
pub use factor::{Factor, Table};
pub use init::Initialization;
pub use network::{BayesianNetwork, BayesianNetworkBuilder};
pub use inference::{
    elimination_order,
    posterior,
    ConditionalInferenceEngine,
    EliminationOrder,
    Evidence,
    FactorKey,
    FactorSet,
    Heuristic,
    VariableEliminationEngine
};
