//! Builder for linear programs made only of `≤` constraints, and the
//! transportation problem between two signatures.

use super::{EmdError, Signature};

/// A sparse row of constraint coefficients as `(variable, coefficient)` pairs.
pub type Row = Vec<(usize, f64)>;

/// A linear program of the form
///
/// ```text
/// minimize    cost · x
/// subject to  rows · x ≤ bounds
///             x ≥ 0
/// ```
///
/// Equalities are stored as a pair of opposing `≤` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    /// The objective coefficient of each variable.
    cost: Vec<f64>,
    /// The sparse coefficients of each constraint row.
    rows: Vec<Row>,
    /// The right-hand side of each constraint row.
    bounds: Vec<f64>,
}

impl LinearProgram {
    /// Creates a program with the given objective and no constraints.
    #[must_use]
    pub const fn new(cost: Vec<f64>) -> Self {
        Self {
            cost,
            rows: Vec::new(),
            bounds: Vec::new(),
        }
    }

    /// Adds the constraint `coefficients · x ≤ bound`.
    ///
    /// # Errors
    ///
    /// * If a coefficient refers to a variable outside the program.
    pub fn add_row(&mut self, coefficients: Row, bound: f64) -> Result<(), EmdError> {
        if let Some(&(v, _)) = coefficients.iter().find(|(v, _)| *v >= self.num_vars()) {
            return Err(EmdError::Configuration(format!(
                "constraint refers to variable {v} but the program has {} variables",
                self.num_vars()
            )));
        }
        self.rows.push(coefficients);
        self.bounds.push(bound);
        Ok(())
    }

    /// Adds the constraint `coefficients · x = value` as the two rows
    /// `coefficients · x ≤ value` and `-coefficients · x ≤ -value`.
    ///
    /// # Errors
    ///
    /// See [`LinearProgram::add_row`].
    pub fn add_equality(&mut self, coefficients: Row, value: f64) -> Result<(), EmdError> {
        let negated = coefficients.iter().map(|&(v, c)| (v, -c)).collect();
        self.add_row(coefficients, value)?;
        self.add_row(negated, -value)
    }

    /// Adds the row `-x_v ≤ 0` for every variable.
    pub fn add_non_negativity(&mut self) {
        for v in 0..self.num_vars() {
            self.rows.push(vec![(v, -1.0)]);
            self.bounds.push(0.0);
        }
    }

    /// The number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.cost.len()
    }

    /// The number of constraint rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The objective coefficients.
    #[must_use]
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// The sparse constraint rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The right-hand side of each row.
    #[must_use]
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// The constraint matrix with every row expanded to `num_vars` entries.
    #[must_use]
    pub fn dense_rows(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| {
                let mut dense = vec![0.0; self.num_vars()];
                for &(v, c) in row {
                    dense[v] += c;
                }
                dense
            })
            .collect()
    }

    /// The objective value `cost · x`.
    #[must_use]
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.cost.iter().zip(x).map(|(c, v)| c * v).sum()
    }

    /// Builds the transportation problem that moves `supply` onto `demand`.
    ///
    /// The flow from window `i` of `supply` to window `j` of `demand` is the
    /// variable at `i * n + j`, and `cost` must be laid out the same way. The
    /// rows are, in order:
    ///
    /// 1. `-f_k ≤ 0` for every flow variable.
    /// 2. For each window `i`: the flow out of supply window `i` equals its
    ///    mass, then the flow into demand window `i` equals its mass, each as
    ///    a pair of `≤` rows.
    ///
    /// This gives `n² + 4n` rows.
    ///
    /// # Errors
    ///
    /// * If the two signatures have different numbers of windows.
    /// * If `cost` does not have `n²` entries.
    pub fn transportation(cost: &[f64], supply: &Signature, demand: &Signature) -> Result<Self, EmdError> {
        let n = supply.len();
        if demand.len() != n {
            return Err(EmdError::Shape {
                expected: n,
                actual: demand.len(),
            });
        }
        if cost.len() != n * n {
            return Err(EmdError::Shape {
                expected: n * n,
                actual: cost.len(),
            });
        }

        let mut program = Self::new(cost.to_vec());
        program.add_non_negativity();

        for i in 0..n {
            let outgoing = (0..n).map(|j| (flow_index(n, i, j), 1.0)).collect();
            program.add_equality(outgoing, supply.masses()[i])?;

            let incoming = (0..n).map(|j| (flow_index(n, j, i), 1.0)).collect();
            program.add_equality(incoming, demand.masses()[i])?;
        }

        Ok(program)
    }
}

/// The position of the flow from window `i` to window `j` among `n` windows.
#[must_use]
pub const fn flow_index(n: usize, i: usize, j: usize) -> usize {
    i * n + j
}
