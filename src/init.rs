//! Module containing initialization routines for the conditional probability tables of a network.

use factor::{Factor, Table};
use util::{VarElimError, Result};
use variable::Variable;

use ndarray::{Array, IxDyn};
use ndarray_rand::RandomExt;
use rand::distributions::Range;

/// Defines possible ways to initialize a `Variable`s CPD.
///
/// Tables are laid out with one axis per parent, in the order the parents are given, followed by
/// the axis of the `Variable` itself.
pub enum Initialization<'a> {
    /// A uniform distribution over all possibilities
    Uniform,

    /// Randomly initialize the weights of the CPD.
    Random,

    /// Initialize the CPD as a Binomial distribution with parameter ```p```, the probability of
    /// the first value. Note that this `Initialization` is valid only to a binary `Variable` with
    /// no parents.
    Binomial(f64),

    /// Initialize the CPD as a Multinomial distribution with parameters ```p_0, p_1...```.
    /// Note that this `Initialization` is valid only to a `Variable` with no parents.
    Multinomial(&'a [f64]),

    /// User defined CPD, given as the flattened (row-major) table
    Table(&'a [f64])
}


impl<'a> Initialization<'a> {

    /// Construct a CPD, initialized based on ```self```
    ///
    /// # Args
    /// * `var`: the `Variable` the CPD is defined for
    /// * `parents`: the parents of `var`, in table axis order
    ///
    /// # Returns
    /// a `Factor` with scope ```parents ++ [var]```, initialized according to ```self```.
    pub fn build_cpd(self, var: &Variable, parents: &[Variable]) -> Result<Factor> {
        ///////////////////////////////////////////////////////////////////////////////
        // Check for errors
        match self {
            // A binomial distribution on a non-binary variable or non-unit scope
            Initialization::Binomial(p) => {
                if var.cardinality() != 2 || ! parents.is_empty() || p < 0.0 || p > 1.0 {
                    return Err(VarElimError::InvalidInitialization);
                }
            },

            // A multinomial distribution with an incorrect number of parameters
            Initialization::Multinomial(ps) => {
                if ps.len() != var.cardinality() || ! parents.is_empty() {
                    return Err(VarElimError::InvalidInitialization);
                }
            },

            _ => ()
        }

        ///////////////////////////////////////////////////////////////////////////////
        // now, build CPD
        let mut shape: Vec<usize> = parents.iter().map(|v| v.cardinality()).collect();
        shape.push(var.cardinality());
        let size: usize = shape.iter().product();

        let values = match self {
            Initialization::Uniform => {
                // normalizing constant is just the number of values
                vec![1. / (var.cardinality() as f64); size]
            },
            Initialization::Random => {
                let raw = Array::random(size, Range::new(1.0, 100.0)).to_vec();
                let mut values = Vec::with_capacity(size);
                for row in raw.chunks(var.cardinality()) {
                    let z: f64 = row.iter().sum();
                    values.extend(row.iter().map(|x| x / z));
                }
                values
            },
            Initialization::Binomial(p) => vec![p, 1.0 - p],
            Initialization::Multinomial(ps) => ps.to_vec(),
            Initialization::Table(vals) => vals.to_vec()
        };

        let tbl = Table::from_shape_vec(IxDyn(&shape), values)
            .map_err(|_| VarElimError::InvalidInitialization)?;

        Factor::cpd(var.clone(), parents.to_vec(), tbl)
    }

}
