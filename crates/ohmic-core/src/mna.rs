//! Modified Nodal Analysis (MNA) matrix structures.
//!
//! Two parallel systems share the same stamping vocabulary: [`MnaSystem`]
//! over real entries for transient analysis and [`ComplexMna`] over complex
//! entries for AC analysis. Every stamp is additive (read-modify-write), so
//! reassembly is simply `clear()` followed by restamping each element.
//!
//! Node arguments are matrix indices (`NodeId::matrix_index`), with `None`
//! standing for ground: any contribution touching a ground row or column is
//! skipped, which keeps the system at its minimal size with no elimination
//! pass afterwards.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// Real MNA system: Ax = b.
///
/// Rows/columns `0..num_nodes` are node voltages; `num_nodes..size` are
/// branch currents (one per voltage source).
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// The coefficient matrix (G matrix extended with B, C, D blocks).
    pub matrix: DMatrix<f64>,
    /// The right-hand side vector.
    pub rhs: DVector<f64>,
    /// Number of nodes (excluding ground).
    pub num_nodes: usize,
    /// Number of branch-current variables.
    pub num_branches: usize,
}

impl MnaSystem {
    /// Create a zeroed system for `num_nodes` non-ground nodes and
    /// `num_branches` branch currents.
    pub fn new(num_nodes: usize, num_branches: usize) -> Self {
        let size = num_nodes + num_branches;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_branches,
        }
    }

    /// Total size of the system (nodes + branch currents).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_branches
    }

    /// Re-zero the matrix and RHS for reassembly.
    pub fn clear(&mut self) {
        self.matrix.fill(0.0);
        self.rhs.fill(0.0);
    }

    /// Stamp a conductance between two nodes.
    ///
    /// For a conductance G between nodes i and j:
    /// - A[i,i] += G, A[j,j] += G
    /// - A[i,j] -= G, A[j,i] -= G
    pub fn stamp_conductance(&mut self, node_i: Option<usize>, node_j: Option<usize>, g: f64) {
        if let Some(i) = node_i {
            self.matrix[(i, i)] += g;
        }
        if let Some(j) = node_j {
            self.matrix[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.matrix[(i, j)] -= g;
            self.matrix[(j, i)] -= g;
        }
    }

    /// Stamp a current source injecting `current` from `node_pos` to
    /// `node_neg` (current leaves pos, enters neg).
    pub fn stamp_current_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        current: f64,
    ) {
        if let Some(i) = node_pos {
            self.rhs[i] -= current;
        }
        if let Some(j) = node_neg {
            self.rhs[j] += current;
        }
    }

    /// Stamp a voltage source V(pos) - V(neg) = voltage.
    ///
    /// `branch_row` is the absolute matrix row of the source's
    /// branch-current unknown.
    pub fn stamp_voltage_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        branch_row: usize,
        voltage: f64,
    ) {
        if let Some(i) = node_pos {
            self.matrix[(i, branch_row)] += 1.0;
            self.matrix[(branch_row, i)] += 1.0;
        }
        if let Some(j) = node_neg {
            self.matrix[(j, branch_row)] -= 1.0;
            self.matrix[(branch_row, j)] -= 1.0;
        }
        self.rhs[branch_row] += voltage;
    }
}

/// Complex MNA system for AC analysis.
///
/// Same layout and stamping rules as [`MnaSystem`] with complex entries.
#[derive(Debug, Clone)]
pub struct ComplexMna {
    /// The coefficient matrix.
    pub matrix: DMatrix<Complex<f64>>,
    /// The right-hand side vector.
    pub rhs: DVector<Complex<f64>>,
    /// Number of nodes (excluding ground).
    pub num_nodes: usize,
    /// Number of branch-current variables.
    pub num_branches: usize,
}

impl ComplexMna {
    /// Create a zeroed complex system.
    pub fn new(num_nodes: usize, num_branches: usize) -> Self {
        let size = num_nodes + num_branches;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_branches,
        }
    }

    /// Total size of the system.
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_branches
    }

    /// Re-zero the matrix and RHS for reassembly.
    pub fn clear(&mut self) {
        self.matrix.fill(Complex::new(0.0, 0.0));
        self.rhs.fill(Complex::new(0.0, 0.0));
    }

    /// Stamp a complex admittance between two nodes.
    pub fn stamp_admittance(
        &mut self,
        node_i: Option<usize>,
        node_j: Option<usize>,
        y: Complex<f64>,
    ) {
        if let Some(i) = node_i {
            self.matrix[(i, i)] += y;
        }
        if let Some(j) = node_j {
            self.matrix[(j, j)] += y;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.matrix[(i, j)] -= y;
            self.matrix[(j, i)] -= y;
        }
    }

    /// Stamp a complex current source injecting `current` from `node_pos`
    /// to `node_neg`.
    pub fn stamp_current_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        current: Complex<f64>,
    ) {
        if let Some(i) = node_pos {
            self.rhs[i] -= current;
        }
        if let Some(j) = node_neg {
            self.rhs[j] += current;
        }
    }

    /// Stamp a voltage source with phasor value `voltage`.
    ///
    /// `branch_row` is the absolute matrix row of the branch-current
    /// unknown.
    pub fn stamp_voltage_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        branch_row: usize,
        voltage: Complex<f64>,
    ) {
        let one = Complex::new(1.0, 0.0);
        if let Some(i) = node_pos {
            self.matrix[(i, branch_row)] += one;
            self.matrix[(branch_row, i)] += one;
        }
        if let Some(j) = node_neg {
            self.matrix[(j, branch_row)] -= one;
            self.matrix[(branch_row, j)] -= one;
        }
        self.rhs[branch_row] += voltage;
    }
}
