//! The circuit container: nodes, elements, and requested analyses.

use ohmic_core::{NodeId, NodeIndex};

use crate::diode::Diode;
use crate::passive::{Capacitor, Inductor, Resistor};
use crate::sources::VoltageSource;
use crate::switch::Switch;

/// Frequency spacing for an AC sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcSweepMode {
    /// Logarithmic spacing, points per decade.
    Decade,
    /// Linear spacing, total point count.
    Linear,
}

/// An `.AC` analysis request.
#[derive(Debug, Clone)]
pub struct AcSweep {
    /// Sweep spacing mode.
    pub mode: AcSweepMode,
    /// Points per decade (Decade) or total points (Linear).
    pub num_points: usize,
    /// Start frequency (Hz).
    pub fstart: f64,
    /// Stop frequency (Hz).
    pub fstop: f64,
}

/// A `.TRAN` analysis request.
#[derive(Debug, Clone)]
pub struct TranSweep {
    /// Requested timestep (s); a non-positive value selects a default.
    pub tstep: f64,
    /// Stop time (s).
    pub tstop: f64,
}

/// A complete circuit ready for simulation.
///
/// Elements are stored per kind and iterated in a fixed order during
/// stamping and output, so results are deterministic. Structure is
/// immutable during analyses; only element state fields (companion
/// history, switch state, diode seed) are mutated, and only by the
/// transient engine.
#[derive(Debug, Default)]
pub struct Circuit {
    /// Circuit title from the netlist's first line.
    pub title: Option<String>,
    /// Node name index; ground is always present.
    pub nodes: NodeIndex,
    pub resistors: Vec<Resistor>,
    pub capacitors: Vec<Capacitor>,
    pub inductors: Vec<Inductor>,
    pub vsources: Vec<VoltageSource>,
    pub switches: Vec<Switch>,
    pub diodes: Vec<Diode>,
    /// Requested AC analysis, if any.
    pub ac: Option<AcSweep>,
    /// Requested transient analysis, if any.
    pub tran: Option<TranSweep>,
    /// Node names from `.PRINT TRAN V(...)`, original casing.
    pub probes: Vec<String>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of node-voltage unknowns (non-ground nodes).
    pub fn num_unknown_nodes(&self) -> usize {
        self.nodes.num_unknowns()
    }

    /// Number of branch-current unknowns (one per voltage source).
    pub fn num_branches(&self) -> usize {
        self.vsources.len()
    }

    /// Total MNA system size.
    pub fn mna_size(&self) -> usize {
        self.num_unknown_nodes() + self.num_branches()
    }

    /// Assign branch-current rows to voltage sources.
    ///
    /// Source k gets the absolute row `(non-ground nodes) + k`. Must run
    /// after all nodes and elements exist and before any analysis; calling
    /// it again reassigns the same indices.
    pub fn finalize(&mut self) {
        let base = self.nodes.num_unknowns();
        for (k, vs) in self.vsources.iter_mut().enumerate() {
            vs.branch_index = base + k;
        }
    }

    /// Convenience lookup of a node id by name (case-insensitive).
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.nodes.lookup(name)
    }
}
