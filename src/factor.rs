//! Definition of the factor module
//!
//! A `Factor` represents a relationship between some set of `Variable`s. It is stored as a dense
//! table with one axis per `Variable` in its scope; every cell of the table is one row of the
//! factor, i.e. one joint assignment of the scope together with its probability mass.

use util::{Result, VarElimError};
use variable::{Assignment, Variable};

use itertools::Itertools;
use ndarray::{ArrayD, Axis, IxDyn};

use std::fmt;

/// Alias f64 ndarray::ArrayD as Table
pub type Table = ArrayD<f64>;

/// Allowed deviation from 1 when checking that a table is a CPD
const CPD_TOLERANCE: f64 = 0.001;


#[derive(Clone, Debug)]
pub struct Factor {
    /// The scope of the `Factor`. Axis `i` of the table ranges over the values of `scope[i]`.
    scope: Vec<Variable>,

    /// The values of the `Factor` table. A `Factor` with empty scope holds a 0-dimensional table.
    table: Table
}


impl Factor {

    /// Create a new `Factor`
    ///
    /// # Errors
    /// * `VarElimError::InvalidScope`, if the table does not have one axis per scope `Variable`
    ///   with a matching length
    /// * `VarElimError::DuplicateVariable`, if a `Variable` appears twice in the scope
    /// * `VarElimError::NegativeProbability`, if any value is negative or not finite
    pub fn new(scope: Vec<Variable>, table: Table) -> Result<Self> {
        if scope.len() != table.ndim() {
            return Err(VarElimError::InvalidScope);
        }

        for (v, &t) in scope.iter().zip(table.shape().iter()) {
            if v.cardinality() != t {
                return Err(VarElimError::InvalidScope);
            }
        }

        for (i, v) in scope.iter().enumerate() {
            if scope[..i].iter().any(|u| u.name() == v.name()) {
                return Err(VarElimError::DuplicateVariable(String::from(v.name())));
            }
        }

        if table.iter().any(|&p| p < 0.0 || ! p.is_finite()) {
            return Err(VarElimError::NegativeProbability);
        }

        Ok(Factor { scope, table })
    }


    /// Create a conditional probability table ```P(var | parents)```.
    ///
    /// The table has one axis per parent, in order, followed by the axis of `var`. For every
    /// assignment to the parents the values along the last axis must sum to 1.
    pub fn cpd(var: Variable, parents: Vec<Variable>, table: Table) -> Result<Self> {
        let mut scope = parents;
        scope.push(var);

        let factor = Factor::new(scope, table)?;
        let last = Axis(factor.scope.len() - 1);
        if factor.table.sum_axis(last).iter().any(|&s| (s - 1.0).abs() > CPD_TOLERANCE) {
            return Err(VarElimError::NotACPD);
        }

        Ok(factor)
    }


    /// A `Factor` with empty scope holding the single value `p`
    pub fn scalar(p: f64) -> Self {
        Factor { scope: vec![], table: Table::from_elem(IxDyn(&[]), p) }
    }


    /// Get the identity factor, the scalar 1
    pub fn identity() -> Self {
        Factor::scalar(1.0)
    }


    /// A point mass over `var`: 1 for the value at `idx`, 0 for every other value
    pub fn indicator(var: &Variable, idx: usize) -> Self {
        let table = Table::from_shape_fn(IxDyn(&[var.cardinality()]), |i| {
            if i[0] == idx { 1.0 } else { 0.0 }
        });

        Factor { scope: vec![var.clone()], table }
    }


    /// Retrieve the scope of the `Factor`
    pub fn scope(&self) -> &[Variable] {
        &self.scope
    }


    /// Check if the `Variable` named `name` is in the scope of this `Factor`
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }


    /// Retrieve the underlying table
    pub fn table(&self) -> &Table {
        &self.table
    }


    /// The number of rows (joint assignments) of the `Factor`
    pub fn len(&self) -> usize {
        self.table.len()
    }


    /// The total probability mass held by the `Factor`
    pub fn total(&self) -> f64 {
        self.table.scalar_sum()
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// assignment: a full assignment to the scope of a `Factor`. The assignment's scope  may be a
    ///             superset  of the `Factor`s scope.
    ///
    /// # Errors
    /// * `VarElimError::IncompleteAssignment`, if assignment is not a complete assignment to the
    ///   scope of the `Factor`
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        let mut idxs = Vec::with_capacity(self.scope.len());
        for v in self.scope.iter() {
            idxs.push(assignment.get(v.name()).ok_or(VarElimError::IncompleteAssignment)?);
        }

        self.table.get(IxDyn(&idxs)).cloned().ok_or(VarElimError::IncompleteAssignment)
    }


    /// Retrieve the value for an assignment given as value literals, e.g.
    /// ```[("Rain", "True"), ("Sprinkler", "False")]```
    pub fn probability(&self, values: &[(&str, &str)]) -> Result<f64> {
        let mut assignment = Assignment::new();
        for &(name, value) in values.iter() {
            if let Some(var) = self.scope.iter().find(|v| v.name() == name) {
                let idx = var.index_of(value).ok_or_else(|| {
                    VarElimError::InvalidEvidence(String::from(name), String::from(value))
                })?;
                assignment.set(name, idx);
            }
        }

        self.value(&assignment)
    }


    /// The rows of the `Factor` as (value literals in scope order, probability) pairs
    pub fn rows(&self) -> Vec<(Vec<&str>, f64)> {
        self.table.indexed_iter()
                  .map(|(idx, &p)| {
                      let values = self.scope.iter()
                                             .enumerate()
                                             .filter_map(|(i, v)| v.value(idx[i]))
                                             .collect();
                      (values, p)
                  })
                  .collect()
    }


    /// Product of this `Factor` and another `Factor`.
    ///
    /// Defined in Koller & Friedman Section 4.2.1. Rows of both factors are joined on the
    /// `Variable`s they share; when they share none every row of `self` is paired with every row
    /// of `other`.
    ///
    /// # Returns
    /// A new `Factor` of scope union(self.scope(), other.scope())
    pub fn product(&self, other: &Self) -> Self {
        // We are computing a new factor Psi(X, Y, Z) = phi1(X, Y) * phi2(Y, Z).
        let scope: Vec<Variable> = self.scope.iter()
                                             .chain(other.scope.iter())
                                             .unique()
                                             .cloned()
                                             .collect();

        let lhs = positions(&self.scope, &scope);
        let rhs = positions(&other.scope, &scope);
        let shape: Vec<usize> = scope.iter().map(|v| v.cardinality()).collect();

        let table = Table::from_shape_fn(IxDyn(&shape), |idx| {
            let l: Vec<usize> = lhs.iter().map(|&p| idx[p]).collect();
            let r: Vec<usize> = rhs.iter().map(|&p| idx[p]).collect();
            self.table[IxDyn(&l)] * other.table[IxDyn(&r)]
        });

        Factor { scope, table }
    }


    /// Reduce the `Factor` over the given partial assignment
    ///
    /// Defined in Koller & Friedman 4.2.3. Only the rows consistent with the assignment are kept
    /// and the assigned `Variable`s are dropped from the scope. Assigned `Variable`s outside the
    /// scope are ignored.
    ///
    /// The assigned value indices must be in range for their `Variable`.
    pub fn reduce(&self, assignment: &Assignment) -> Self {
        let mut scope = self.scope.clone();
        let mut table = self.table.clone();

        // walk the axes back to front so removing one does not shift those still to visit
        for i in (0..self.scope.len()).rev() {
            if let Some(idx) = assignment.get(self.scope[i].name()) {
                table = table.subview(Axis(i), idx).to_owned();
                scope.remove(i);
            }
        }

        Factor { scope, table }
    }


    /// Marginalize the `Factor` over the `Variable` named `name`
    ///
    /// Defined in Koller & Friedman 9.3.1. Marginalizing the only `Variable` in the scope leaves a
    /// scalar `Factor` holding the total mass.
    pub fn marginalize(&self, name: &str) -> Self {
        match self.position(name) {
            Some(idx) => {
                let table = self.table.sum_axis(Axis(idx));
                let scope = self.scope.iter().filter(|v| v.name() != name).cloned().collect();

                Factor { scope, table }
            },
            // not in the scope of this factor, so the factor is already marginalized
            None => self.clone()
        }
    }


    /// Normalize the `Factor` so its values sum to 1
    ///
    /// # Errors
    /// * `VarElimError::ZeroProbabilityEvidence`, if the `Factor` holds no probability mass
    pub fn normalize(&self) -> Result<Self> {
        let z = self.total();
        if ! (z > 0.0) || ! z.is_finite() {
            return Err(VarElimError::ZeroProbabilityEvidence);
        }

        Ok(Factor { scope: self.scope.clone(), table: self.table.mapv(|p| p / z) })
    }


    fn position(&self, name: &str) -> Option<usize> {
        self.scope.iter().position(|v| v.name() == name)
    }

}


/// Position in `sup` of each `Variable` of `sub`
fn positions(sub: &[Variable], sup: &[Variable]) -> Vec<usize> {
    sub.iter()
       .filter_map(|v| sup.iter().position(|s| s.name() == v.name()))
       .collect()
}


impl fmt::Display for Factor {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.scope.iter().map(|v| v.name()).chain(Some("prob")).join("\t"))?;
        for (values, p) in self.rows() {
            writeln!(
                f,
                "{}",
                values.into_iter().map(String::from).chain(Some(format!("{:.6}", p))).join("\t")
            )?;
        }

        Ok(())
    }

}


// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use std;

    const EPS: f64 = 1e-12;

    fn kf_product_inputs() -> (Variable, Variable, Variable, Factor, Factor) {
        let a = Variable::new("A", &["a1", "a2", "a3"]);
        let b = Variable::binary("B");
        let c = Variable::binary("C");

        let phi1 = Factor::new(
            vec![ a.clone(), b.clone() ],
            array![[ 0.5, 0.8 ], [ 0.1, 0. ], [ 0.3, 0.9 ]].into_dyn()
        ).expect("Unexpected error");

        let phi2 = Factor::new(
            vec![ b.clone(), c.clone() ],
            array![[ 0.5, 0.7 ], [ 0.1, 0.2 ]].into_dyn()
        ).expect("Unexpected error");

        (a, b, c, phi1, phi2)
    }

    fn assn(pairs: &[(&str, usize)]) -> Assignment {
        let mut a = Assignment::new();
        for &(n, i) in pairs.iter() {
            a.set(n, i);
        }
        a
    }

    #[test]
    fn table_factor_errs() {
        let a = Variable::binary("A");
        let b = Variable::binary("B");

        // mismatched number of dimensions
        let f = Factor::new(vec![ a.clone(), b.clone() ], Table::ones(IxDyn(&[2, 2, 2])));
        assert_eq!(f.err(), Some(VarElimError::InvalidScope));

        // wrong cardinality
        let f = Factor::new(vec![ a.clone(), b.clone() ], Table::ones(IxDyn(&[2, 3])));
        assert_eq!(f.err(), Some(VarElimError::InvalidScope));

        // duplicated variable
        let f = Factor::new(vec![ a.clone(), a.clone() ], Table::ones(IxDyn(&[2, 2])));
        assert_eq!(f.err(), Some(VarElimError::DuplicateVariable(String::from("A"))));

        // negative mass
        let f = Factor::new(vec![ a.clone() ], array![ 0.5, -0.5 ].into_dyn());
        assert_eq!(f.err(), Some(VarElimError::NegativeProbability));

        // not a cpd
        let f = Factor::cpd(a.clone(), vec![ b.clone() ], array![[ 0.5, 0.5 ], [ 0.5, 0.6 ]].into_dyn());
        assert_eq!(f.err(), Some(VarElimError::NotACPD));
    }

    #[test]
    fn cpd() {
        let a = Variable::binary("A");
        let b = Variable::binary("B");

        let f = Factor::cpd(b.clone(), vec![ a.clone() ], array![[ 0.9, 0.1 ], [ 0.2, 0.8 ]].into_dyn())
            .expect("Unexpected error");

        assert_eq!(vec![ a, b ], f.scope().to_vec());
        assert_eq!(4, f.len());
        assert!((f.value(&assn(&[("A", 1), ("B", 0)])).unwrap() - 0.2).abs() < EPS);
    }

    #[test]
    fn value() {
        let (_, _, _, phi1, _) = kf_product_inputs();

        assert_eq!(0.3, phi1.value(&assn(&[("A", 2), ("B", 0)])).unwrap());

        // superset assignments are fine
        assert_eq!(0.9, phi1.value(&assn(&[("A", 2), ("B", 1), ("Z", 4)])).unwrap());

        // incomplete assignments are not
        assert_eq!(
            Some(VarElimError::IncompleteAssignment),
            phi1.value(&assn(&[("A", 2)])).err()
        );

        assert_eq!(0.8, phi1.probability(&[("A", "a1"), ("B", "False")]).unwrap());
        assert_eq!(
            Some(VarElimError::InvalidEvidence(String::from("B"), String::from("Maybe"))),
            phi1.probability(&[("A", "a1"), ("B", "Maybe")]).err()
        );
    }

    #[test]
    /// Example taken from Koller & Friedman Figure 4.3
    fn product() {
        let (a, b, c, phi1, phi2) = kf_product_inputs();

        let phi = phi1.product(&phi2);
        assert_eq!(vec![ a, b, c ], phi.scope().to_vec());

        let expected = array![[[ 0.25, 0.35 ], [ 0.08, 0.16 ]],
                              [[ 0.05, 0.07 ], [ 0.,   0.   ]],
                              [[ 0.15, 0.21 ], [ 0.09, 0.18 ]]];

        for (x, y, z) in iproduct!(0..3, 0..2, 0..2) {
            let val = phi.value(&assn(&[("A", x), ("B", y), ("C", z)])).unwrap();
            assert!((expected[[x, y, z]] - val).abs() < EPS);
        }
    }

    #[test]
    fn product_commutes() {
        let (_, _, _, phi1, phi2) = kf_product_inputs();

        let lhs = phi1.product(&phi2);
        let rhs = phi2.product(&phi1);

        assert_eq!(lhs.len(), rhs.len());
        for (x, y, z) in iproduct!(0..3, 0..2, 0..2) {
            let a = assn(&[("A", x), ("B", y), ("C", z)]);
            assert!((lhs.value(&a).unwrap() - rhs.value(&a).unwrap()).abs() < EPS);
        }
    }

    #[test]
    fn product_without_common_variables() {
        let a = Variable::binary("A");
        let c = Variable::new("C", &["x", "y", "z"]);

        let phi1 = Factor::new(vec![ a ], array![ 0.4, 0.6 ].into_dyn()).unwrap();
        let phi2 = Factor::new(vec![ c ], array![ 0.2, 0.3, 0.5 ].into_dyn()).unwrap();

        let phi = phi1.product(&phi2);
        assert_eq!(6, phi.len());
        assert!((phi.total() - 1.0).abs() < EPS);

        let p = phi.probability(&[("A", "False"), ("C", "z")]).unwrap();
        assert!((p - 0.3).abs() < EPS);
    }

    #[test]
    fn prod_identity() {
        let (_, _, _, phi1, _) = kf_product_inputs();

        let phi = phi1.product(&Factor::identity());
        assert_eq!(phi1.scope(), phi.scope());
        assert_eq!(phi1.table(), phi.table());

        let phi = Factor::identity().product(&phi1);
        assert_eq!(phi1.scope(), phi.scope());
        assert_eq!(phi1.table(), phi.table());
    }

    #[test]
    fn prod_scalar() {
        let (_, _, _, phi1, _) = kf_product_inputs();

        let phi = phi1.product(&Factor::scalar(0.5));
        assert_eq!(phi1.scope(), phi.scope());
        for (x, y) in iproduct!(0..3, 0..2) {
            let a = assn(&[("A", x), ("B", y)]);
            assert!((0.5 * phi1.value(&a).unwrap() - phi.value(&a).unwrap()).abs() < EPS);
        }

        let phi = Factor::scalar(0.5).product(&Factor::scalar(0.25));
        assert!(phi.scope().is_empty());
        assert_eq!(0.125, phi.total());
    }

    #[test]
    /// Example take from Koller & Friedman Figure 4.5
    fn reduce_simple() {
        let (_, _, _, phi1, phi2) = kf_product_inputs();
        let phi = phi1.product(&phi2);

        let reduced = phi.reduce(&assn(&[("C", 0)]));
        assert_eq!(vec!["A", "B"], reduced.scope().iter().map(|v| v.name()).collect::<Vec<_>>());

        let expected = array![[ 0.25, 0.08 ], [ 0.05, 0. ], [ 0.15, 0.09 ]];
        for (x, y) in iproduct!(0..3, 0..2) {
            let val = reduced.value(&assn(&[("A", x), ("B", y)])).unwrap();
            assert!((expected[[x, y]] - val).abs() < EPS);
        }
    }

    #[test]
    fn reduce_absent() {
        let (_, _, _, phi1, _) = kf_product_inputs();

        let reduced = phi1.reduce(&assn(&[("C", 1)]));
        assert_eq!(phi1.scope(), reduced.scope());
        assert_eq!(phi1.table(), reduced.table());
    }

    #[test]
    fn reduce_multiple() {
        let (_, _, _, phi1, phi2) = kf_product_inputs();
        let phi = phi1.product(&phi2);

        let reduced = phi.reduce(&assn(&[("C", 0), ("A", 2)]));
        assert_eq!(vec!["B"], reduced.scope().iter().map(|v| v.name()).collect::<Vec<_>>());
        assert!((reduced.probability(&[("B", "True")]).unwrap() - 0.15).abs() < EPS);
        assert!((reduced.probability(&[("B", "False")]).unwrap() - 0.09).abs() < EPS);

        let full = phi.reduce(&assn(&[("A", 0), ("B", 1), ("C", 1)]));
        assert!(full.scope().is_empty());
        assert!((full.total() - 0.16).abs() < EPS);
    }

    #[test]
    /// Example taken from Koller & Friedman Figure 9.7
    fn marginalize() {
        let (_, _, _, phi1, phi2) = kf_product_inputs();
        let phi = phi1.product(&phi2);

        let marginalized = phi.marginalize("B");
        assert_eq!(vec!["A", "C"], marginalized.scope().iter().map(|v| v.name()).collect::<Vec<_>>());

        let expected = array![[ 0.33, 0.51 ], [ 0.05, 0.07 ], [ 0.24, 0.39 ]];
        for (x, y) in iproduct!(0..3, 0..2) {
            let val = marginalized.value(&assn(&[("A", x), ("C", y)])).unwrap();
            assert!((expected[[x, y]] - val).abs() < 1e-9);
        }

        // a variable outside the scope is a no-op
        let same = phi.marginalize("Z");
        assert_eq!(phi.table(), same.table());
    }

    #[test]
    fn marginalize_preserves_mass() {
        let (_, _, _, phi1, phi2) = kf_product_inputs();
        let phi = phi1.product(&phi2);

        let only_c = phi.marginalize("A").marginalize("B");
        assert_eq!(1, only_c.scope().len());
        assert!((only_c.total() - phi.total()).abs() < 1e-9);

        let scalar = only_c.marginalize("C");
        assert!(scalar.scope().is_empty());
        assert_eq!(1, scalar.len());
        assert!((scalar.total() - phi.total()).abs() < 1e-9);
    }

    #[test]
    fn normalize() {
        let (_, _, _, phi1, _) = kf_product_inputs();

        let phi = phi1.normalize().unwrap();
        assert!((phi.total() - 1.0).abs() < 1e-9);
        assert!((phi.value(&assn(&[("A", 0), ("B", 0)])).unwrap() - 0.5 / 2.6).abs() < 1e-9);

        let zero = Factor::new(vec![ Variable::binary("A") ], array![ 0., 0. ].into_dyn()).unwrap();
        assert_eq!(Some(VarElimError::ZeroProbabilityEvidence), zero.normalize().err());
    }

    #[test]
    fn indicator() {
        let c = Variable::new("C", &["x", "y", "z"]);
        let f = Factor::indicator(&c, 1);

        assert_eq!(1.0, f.probability(&[("C", "y")]).unwrap());
        assert_eq!(0.0, f.probability(&[("C", "z")]).unwrap());
        assert!((f.total() - 1.0).abs() < std::f64::EPSILON);
    }

    #[test]
    fn display() {
        let a = Variable::binary("A");
        let f = Factor::new(vec![ a ], array![ 0.25, 0.75 ].into_dyn()).unwrap();

        assert_eq!("A\tprob\nTrue\t0.250000\nFalse\t0.750000\n", f.to_string());
        assert_eq!("prob\n0.500000\n", Factor::scalar(0.5).to_string());
    }
}
