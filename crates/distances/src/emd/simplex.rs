//! A dense two-phase simplex solver for [`LinearProgram`]s.
//!
//! Rows with a negative bound are flipped into `≥` rows and given an
//! artificial variable. Phase 1 drives the artificial variables to zero and
//! phase 2 minimizes the real objective from the feasible basis found by
//! phase 1. Pricing uses the most negative reduced cost and falls back to
//! Bland's rule after a run of degenerate pivots, which rules out cycling.

use super::LinearProgram;

/// Options for the simplex solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinProgOptions {
    /// Maximum number of pivots over both phases.
    pub max_iter: usize,
    /// Tolerance for reduced costs and pivot elements.
    pub tol: f64,
    /// Largest phase 1 objective still accepted as feasible.
    pub feasibility_tol: f64,
    /// Number of consecutive degenerate pivots before switching to Bland's rule.
    pub degenerate_limit: usize,
}

impl Default for LinProgOptions {
    fn default() -> Self {
        Self {
            max_iter: 50_000,
            tol: 1e-9,
            feasibility_tol: 1e-7,
            degenerate_limit: 50,
        }
    }
}

/// Why the solver could not return an optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// No point satisfies every constraint.
    Infeasible,
    /// The objective decreases without bound over the feasible region.
    Unbounded,
    /// The solver gave up after this many pivots.
    IterationLimit(usize),
}

impl core::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Infeasible => write!(f, "the linear program is infeasible"),
            Self::Unbounded => write!(f, "the linear program is unbounded"),
            Self::IterationLimit(n) => write!(f, "the simplex solver stopped after {n} pivots"),
        }
    }
}

/// An optimal solution of a linear program.
#[derive(Debug, Clone, PartialEq)]
pub struct LinProgResult {
    /// The optimal value of each variable.
    pub x: Vec<f64>,
    /// The optimal objective value.
    pub fun: f64,
    /// The number of pivots performed.
    pub nit: usize,
}

/// Minimizes `program` with the simplex method.
///
/// # Errors
///
/// * `SolverStatus::Infeasible` if phase 1 cannot reach a feasible basis.
/// * `SolverStatus::Unbounded` if the objective is unbounded below.
/// * `SolverStatus::IterationLimit` if more than `options.max_iter` pivots are needed.
pub fn linprog(program: &LinearProgram, options: &LinProgOptions) -> Result<LinProgResult, SolverStatus> {
    let mut tableau = Tableau::new(program);
    let mut nit = 0;

    if tableau.num_artificial() > 0 {
        tableau.load_phase_one();
        tableau.run(tableau.artificial_start() + tableau.num_artificial(), options, &mut nit)?;
        if tableau.value() > options.feasibility_tol {
            return Err(SolverStatus::Infeasible);
        }
        tableau.drop_artificials(options.tol);
    }

    tableau.load_phase_two(program.cost());
    tableau.run(tableau.artificial_start(), options, &mut nit)?;

    let x = tableau.solution(program.num_vars());
    let fun = program.objective(&x);
    Ok(LinProgResult { x, fun, nit })
}

/// Whether `row · x ≤ bound` holds for every `x ≥ 0`.
fn is_implied(row: &[(usize, f64)], bound: f64) -> bool {
    bound >= 0.0 && row.iter().all(|&(_, c)| c <= 0.0)
}

/// A dense simplex tableau in canonical form.
///
/// Columns are laid out as the program variables, then one slack or surplus
/// variable per row, then the artificial variables. The last entry of every
/// row is its right-hand side.
struct Tableau {
    /// The constraint rows.
    cells: Vec<Vec<f64>>,
    /// The reduced costs, with the negated objective value as the last entry.
    objective: Vec<f64>,
    /// The basic variable of each row.
    basis: Vec<usize>,
    /// The number of columns, not counting the right-hand side.
    width: usize,
    /// The index of the first artificial column.
    artificial_start: usize,
}

impl Tableau {
    /// Puts the program into canonical form with an initial feasible basis
    /// made of slack and artificial variables.
    ///
    /// Rows that every `x ≥ 0` satisfies, such as the `-x_v ≤ 0` rows of
    /// [`LinearProgram::add_non_negativity`], are left out of the tableau.
    fn new(program: &LinearProgram) -> Self {
        let n = program.num_vars();
        let kept = program
            .rows()
            .iter()
            .zip(program.bounds())
            .filter(|&(row, &bound)| !is_implied(row, bound))
            .collect::<Vec<_>>();
        let m = kept.len();
        let num_artificial = kept.iter().filter(|&&(_, &b)| b < 0.0).count();

        let artificial_start = n + m;
        let width = artificial_start + num_artificial;

        let mut cells = Vec::with_capacity(m);
        let mut basis = Vec::with_capacity(m);
        let mut next_artificial = artificial_start;

        for (i, &(row, &bound)) in kept.iter().enumerate() {
            let flipped = bound < 0.0;
            let sign = if flipped { -1.0 } else { 1.0 };
            let mut cell = vec![0.0; width + 1];
            for &(v, c) in row {
                cell[v] += sign * c;
            }
            cell[n + i] = sign;
            cell[width] = sign * bound;

            if flipped {
                cell[next_artificial] = 1.0;
                basis.push(next_artificial);
                next_artificial += 1;
            } else {
                basis.push(n + i);
            }
            cells.push(cell);
        }

        Self {
            cells,
            objective: vec![0.0; width + 1],
            basis,
            width,
            artificial_start,
        }
    }

    /// The index of the first artificial column.
    const fn artificial_start(&self) -> usize {
        self.artificial_start
    }

    /// The number of artificial columns.
    const fn num_artificial(&self) -> usize {
        self.width - self.artificial_start
    }

    /// The current objective value.
    fn value(&self) -> f64 {
        -self.objective[self.width]
    }

    /// Loads the phase 1 objective: the sum of the artificial variables.
    fn load_phase_one(&mut self) {
        let costs = (0..self.width)
            .map(|j| if j >= self.artificial_start { 1.0 } else { 0.0 })
            .collect::<Vec<_>>();
        self.load_objective(&costs);
    }

    /// Loads the phase 2 objective over the program variables.
    fn load_phase_two(&mut self, cost: &[f64]) {
        let mut costs = vec![0.0; self.width];
        costs[..cost.len()].copy_from_slice(cost);
        self.load_objective(&costs);
    }

    /// Sets the objective row to the reduced costs of `costs` under the
    /// current basis.
    fn load_objective(&mut self, costs: &[f64]) {
        self.objective = costs.iter().copied().chain(core::iter::once(0.0)).collect();
        for (row, &b) in self.cells.iter().zip(&self.basis) {
            let cb = costs[b];
            if cb != 0.0 {
                for (o, &v) in self.objective.iter_mut().zip(row) {
                    *o -= cb * v;
                }
            }
        }
    }

    /// Pivots until no column below `allowed` has a negative reduced cost.
    fn run(&mut self, allowed: usize, options: &LinProgOptions, nit: &mut usize) -> Result<(), SolverStatus> {
        let mut bland = false;
        let mut degenerate = 0;

        loop {
            let Some(column) = self.entering(allowed, options.tol, bland) else {
                return Ok(());
            };
            if *nit >= options.max_iter {
                return Err(SolverStatus::IterationLimit(*nit));
            }
            let Some((row, ratio)) = self.leaving(column, options.tol) else {
                return Err(SolverStatus::Unbounded);
            };

            if ratio <= options.tol {
                degenerate += 1;
                bland = bland || degenerate > options.degenerate_limit;
            } else {
                degenerate = 0;
            }

            self.pivot(row, column, options.tol);
            *nit += 1;
        }
    }

    /// Chooses the entering column, if any column can improve the objective.
    fn entering(&self, allowed: usize, tol: f64, bland: bool) -> Option<usize> {
        let mut candidates = self.objective[..allowed]
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r < -tol);

        if bland {
            candidates.next().map(|(j, _)| j)
        } else {
            candidates
                .min_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(j, _)| j)
        }
    }

    /// Chooses the leaving row by the minimum ratio test, breaking ties by the
    /// smallest basic variable.
    fn leaving(&self, column: usize, tol: f64) -> Option<(usize, f64)> {
        let ratios = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row[column] > tol)
            .map(|(i, row)| (i, row[self.width] / row[column]))
            .collect::<Vec<_>>();

        let min = ratios.iter().map(|&(_, r)| r).min_by(f64::total_cmp)?;
        ratios
            .into_iter()
            .filter(|&(_, r)| r <= min + tol)
            .min_by_key(|&(i, _)| self.basis[i])
    }

    /// Makes `column` basic in `row`.
    fn pivot(&mut self, row: usize, column: usize, tol: f64) {
        let p = self.cells[row][column];
        for v in &mut self.cells[row] {
            *v /= p;
        }
        let pivot_row = self.cells[row]
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(j, &v)| (j, v))
            .collect::<Vec<_>>();

        let rhs = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let factor = cell[column];
            if i == row || factor == 0.0 {
                continue;
            }
            for &(j, v) in &pivot_row {
                cell[j] -= factor * v;
            }
            cell[column] = 0.0;
            if cell[rhs] < 0.0 && cell[rhs] > -tol {
                cell[rhs] = 0.0;
            }
        }

        let factor = self.objective[column];
        if factor != 0.0 {
            for &(j, v) in &pivot_row {
                self.objective[j] -= factor * v;
            }
            self.objective[column] = 0.0;
        }

        self.basis[row] = column;
    }

    /// Pivots artificial variables that remain basic at zero out of the basis
    /// and removes the rows where that is impossible, since those rows are
    /// linear combinations of the others.
    fn drop_artificials(&mut self, tol: f64) {
        let mut redundant = Vec::new();
        for row in 0..self.cells.len() {
            if self.basis[row] < self.artificial_start {
                continue;
            }
            let replacement = self.cells[row][..self.artificial_start]
                .iter()
                .enumerate()
                .filter(|(_, v)| v.abs() > tol)
                .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
                .map(|(j, _)| j);

            match replacement {
                Some(column) => self.pivot(row, column, tol),
                None => redundant.push(row),
            }
        }

        for &row in redundant.iter().rev() {
            self.cells.remove(row);
            self.basis.remove(row);
        }
    }

    /// The values of the first `n` variables at the current basis.
    fn solution(&self, n: usize) -> Vec<f64> {
        let mut x = vec![0.0; n];
        for (row, &b) in self.cells.iter().zip(&self.basis) {
            if b < n {
                x[b] = row[self.width].max(0.0);
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::{linprog, LinProgOptions, SolverStatus, Tableau};
    use crate::emd::LinearProgram;

    #[test]
    fn maximizes_with_upper_bounds() {
        // maximize x + 2y subject to x + y <= 4, x <= 2, y <= 3
        let mut program = LinearProgram::new(vec![-1.0, -2.0]);
        program.add_row(vec![(0, 1.0), (1, 1.0)], 4.0).unwrap();
        program.add_row(vec![(0, 1.0)], 2.0).unwrap();
        program.add_row(vec![(1, 1.0)], 3.0).unwrap();

        let result = linprog(&program, &LinProgOptions::default()).unwrap();
        assert!(approx_eq!(f64, result.fun, -7.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.x[0], 1.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.x[1], 3.0, epsilon = 1e-9));
    }

    #[test]
    fn equality_constraint() {
        let mut program = LinearProgram::new(vec![1.0, 1.0]);
        program.add_equality(vec![(0, 1.0), (1, 1.0)], 2.0).unwrap();

        let result = linprog(&program, &LinProgOptions::default()).unwrap();
        assert!(approx_eq!(f64, result.fun, 2.0, epsilon = 1e-9));
    }

    #[test]
    fn lower_bounded_rows() {
        // minimize x + y subject to x + 2y >= 4, 3x + y >= 6
        let mut program = LinearProgram::new(vec![1.0, 1.0]);
        program.add_row(vec![(0, -1.0), (1, -2.0)], -4.0).unwrap();
        program.add_row(vec![(0, -3.0), (1, -1.0)], -6.0).unwrap();
        program.add_non_negativity();

        let result = linprog(&program, &LinProgOptions::default()).unwrap();
        assert!(approx_eq!(f64, result.fun, 2.8, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.x[0], 1.6, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.x[1], 1.2, epsilon = 1e-9));
    }

    #[test]
    fn reports_infeasible() {
        let mut program = LinearProgram::new(vec![1.0]);
        program.add_row(vec![(0, 1.0)], 1.0).unwrap();
        program.add_row(vec![(0, -1.0)], -2.0).unwrap();

        assert_eq!(
            linprog(&program, &LinProgOptions::default()),
            Err(SolverStatus::Infeasible)
        );
    }

    #[test]
    fn reports_unbounded() {
        let mut program = LinearProgram::new(vec![-1.0, 0.0]);
        program.add_row(vec![(0, 1.0), (1, -1.0)], 1.0).unwrap();

        assert_eq!(
            linprog(&program, &LinProgOptions::default()),
            Err(SolverStatus::Unbounded)
        );
    }

    #[test]
    fn reports_iteration_limit() {
        // Optimal after exactly two pivots: y enters first, then x.
        let mut program = LinearProgram::new(vec![-1.0, -2.0]);
        program.add_row(vec![(0, 1.0), (1, 1.0)], 4.0).unwrap();
        program.add_row(vec![(1, 1.0)], 3.0).unwrap();

        let options = LinProgOptions {
            max_iter: 1,
            ..LinProgOptions::default()
        };
        assert_eq!(linprog(&program, &options), Err(SolverStatus::IterationLimit(1)));

        let options = LinProgOptions {
            max_iter: 2,
            ..LinProgOptions::default()
        };
        let result = linprog(&program, &options).unwrap();
        assert_eq!(result.nit, 2);
        assert!(approx_eq!(f64, result.fun, -7.0, epsilon = 1e-9));
    }

    #[test]
    fn implied_rows_stay_out_of_the_tableau() {
        let n = 16;
        let cost = (0..n * n)
            .map(|k| if k % (n + 1) == 0 { 0.0 } else { 1.0 })
            .collect::<Vec<_>>();
        let mut program = LinearProgram::new(cost);
        program.add_non_negativity();
        for i in 0..n {
            let outgoing = (0..n).map(|j| (i * n + j, 1.0)).collect();
            program.add_equality(outgoing, 1.0 / 16.0).unwrap();
            let incoming = (0..n).map(|j| (j * n + i, 1.0)).collect();
            program.add_equality(incoming, 1.0 / 16.0).unwrap();
        }
        assert_eq!(program.num_rows(), n * n + 4 * n);

        let tableau = Tableau::new(&program);
        assert_eq!(tableau.cells.len(), 4 * n);
        assert_eq!(tableau.num_artificial(), 2 * n);
        assert_eq!(tableau.width, n * n + 4 * n + 2 * n);

        // Every window keeps its mass in place along the zero-cost diagonal.
        let result = linprog(&program, &LinProgOptions::default()).unwrap();
        assert!(result.fun.abs() < 1e-9, "{}", result.fun);
        assert!(result.x.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn redundant_transport_rows() {
        // Every equality system of a transportation problem has one redundant
        // row, which phase 1 has to detect.
        let cost = vec![0.0, 1.0, 1.0, 0.0];
        let mut program = LinearProgram::new(cost);
        program.add_non_negativity();
        program.add_equality(vec![(0, 1.0), (1, 1.0)], 0.7).unwrap();
        program.add_equality(vec![(0, 1.0), (2, 1.0)], 0.2).unwrap();
        program.add_equality(vec![(2, 1.0), (3, 1.0)], 0.3).unwrap();
        program.add_equality(vec![(1, 1.0), (3, 1.0)], 0.8).unwrap();

        let result = linprog(&program, &LinProgOptions::default()).unwrap();
        assert!(approx_eq!(f64, result.fun, 0.5, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.x[1], 0.5, epsilon = 1e-9));
        assert!(result.x.iter().all(|&v| v >= 0.0));
    }
}
