//! Defines the `Error` type for the varelim library

use std::error::Error;
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, VarElimError>;

#[derive(Clone, Debug, PartialEq)]
pub enum VarElimError {

    /// The query variable is not part of the network
    InvalidQuery(String),

    /// An evidence assignment names a variable that is not part of the network, or a value that
    /// is not in that variable's value set. The tuple holds the variable and the value.
    InvalidEvidence(String, String),

    /// The evidence has zero probability under the model, so the posterior cannot be normalized
    ZeroProbabilityEvidence,

    /// There were no factors to combine
    NoFactors,

    /// An explicit elimination order named a variable that is not part of the network
    InvalidOrdering(String),

    /// Represents an incomplete assignment where a complete assignment was required.
    IncompleteAssignment,

    /// Represents an error where a certain constraint on a scope was not satisfied
    InvalidScope,

    /// Represents a variable that was present multiple times in a situation where it should only
    /// have been present once
    DuplicateVariable(String),

    /// Represents an error where there was a parent variable expected, but not found
    MissingParent(String),

    /// Represents the situation when we expected a CPD but did not receive one
    NotACPD,

    /// Represents a situation in which a negative (or non-finite) probability was provided
    NegativeProbability,

    /// Represents an attempt to initialize a variable with an incompatible Initialization
    InvalidInitialization,

}

impl Error for VarElimError {

    fn description(&self) -> &str {
        match self {
            &VarElimError::InvalidQuery(_) => "The query variable is not in the network",
            &VarElimError::InvalidEvidence(..) => "The evidence does not match the network",
            &VarElimError::ZeroProbabilityEvidence => "The evidence has zero probability",
            &VarElimError::NoFactors => "There are no factors to combine",
            &VarElimError::InvalidOrdering(_) => "The elimination order names an unknown variable",
            &VarElimError::IncompleteAssignment => "Missing assignments to the required Variables",
            &VarElimError::InvalidScope => "Provided scope did not satisfy constraints",
            &VarElimError::DuplicateVariable(_) => "A variable was encountered twice",
            &VarElimError::MissingParent(_) => "Missing a parent from the model",
            &VarElimError::NotACPD => "Requires a Conditional Probability Distribution",
            &VarElimError::NegativeProbability => "Encountered a negative probability",
            &VarElimError::InvalidInitialization => "An invalid initialization was provided",
        }
    }

    fn cause(&self) -> Option<&Error> {
        None
    }

}

impl fmt::Display for VarElimError {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &VarElimError::InvalidQuery(ref name) => {
                write!(f, "{}: {}", self.description(), name)
            },
            &VarElimError::InvalidEvidence(ref name, ref value) => {
                write!(f, "{}: {} = {}", self.description(), name, value)
            },
            &VarElimError::InvalidOrdering(ref name)
            | &VarElimError::DuplicateVariable(ref name)
            | &VarElimError::MissingParent(ref name) => {
                write!(f, "{}: {}", self.description(), name)
            },
            _ => write!(f, "{}", self.description())
        }
    }

}
