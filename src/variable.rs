//! Definition of the variable module
//!
//! A `Variable` represents a discrete random variable in a Bayesian Network. Variables are
//! identified by name; each holds the ordered set of values it may take on.

use std::collections::HashMap;
use std::fmt;


/// A discrete random variable with a named, ordered set of values
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    /// The name of the `Variable`
    name: String,

    /// The values the `Variable` may take on, in order
    values: Vec<String>
}

impl Variable {

    /// Construct a new `Variable` over an enumerated set of values
    pub fn new(name: &str, values: &[&str]) -> Variable {
        Variable {
            name: String::from(name),
            values: values.iter().map(|s| String::from(*s)).collect()
        }
    }

    /// Construct a new binary `Variable` with the values `True` and `False`
    pub fn binary(name: &str) -> Variable {
        Variable::new(name, &["True", "False"])
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the values of the `Variable`
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Get the number of values the `Variable` may take on
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    /// Look up the index of a value literal, if it belongs to this `Variable`
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Look up the value literal at the given index
    pub fn value(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(|v| v.as_str())
    }
}

impl fmt::Display for Variable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }

}


/// A (partial) assignment of values to `Variable`s. Values are held as indices into each
/// `Variable`'s value set, keyed by the `Variable`'s name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    values: HashMap<String, usize>
}

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: HashMap::new() }
    }

    /// Assign the value at index `idx` to the `Variable` named `name`
    pub fn set(&mut self, name: &str, idx: usize) {
        self.values.insert(String::from(name), idx);
    }

    /// Get the index of the value assigned to the `Variable` named `name`
    pub fn get(&self, name: &str) -> Option<usize> {
        self.values.get(name).cloned()
    }

    /// Check if the `Variable` named `name` has an assigned value
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over the names of the assigned `Variable`s
    pub fn names<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
