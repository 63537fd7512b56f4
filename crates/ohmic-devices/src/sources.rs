//! Independent voltage sources.

use num_complex::Complex;
use ohmic_core::from_polar_deg;
use ohmic_core::mna::{ComplexMna, MnaSystem};
use ohmic_core::NodeId;

use crate::waveforms::Waveform;

/// An independent voltage source.
///
/// Carries a DC value, an optional AC stimulus (magnitude and phase), and
/// an optional time-domain waveform. The branch-current unknown lives at
/// matrix row `branch_index`, assigned when the circuit is finalized.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    /// Device name (e.g., "V1").
    pub name: String,
    /// Positive terminal node.
    pub node_pos: NodeId,
    /// Negative terminal node.
    pub node_neg: NodeId,
    /// DC voltage value in volts.
    pub dc: f64,
    /// AC stimulus magnitude (0 for DC-only sources).
    pub ac_mag: f64,
    /// AC stimulus phase in degrees.
    pub ac_phase_deg: f64,
    /// Optional time-domain waveform; `dc` is used when absent.
    pub waveform: Option<Waveform>,
    /// Absolute MNA row of this source's branch-current unknown.
    pub branch_index: usize,
}

impl VoltageSource {
    /// Create a DC-only voltage source.
    pub fn new(name: impl Into<String>, node_pos: NodeId, node_neg: NodeId, dc: f64) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            dc,
            ac_mag: 0.0,
            ac_phase_deg: 0.0,
            waveform: None,
            branch_index: 0,
        }
    }

    /// Attach an AC stimulus.
    pub fn with_ac(mut self, mag: f64, phase_deg: f64) -> Self {
        self.ac_mag = mag;
        self.ac_phase_deg = phase_deg;
        self
    }

    /// Attach a time-domain waveform.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = Some(waveform);
        self
    }

    /// Source value at time t: the waveform when present, else `dc`.
    pub fn value_at(&self, t: f64) -> f64 {
        match &self.waveform {
            Some(w) => w.value_at(t),
            None => self.dc,
        }
    }

    /// AC stimulus phasor. DC-only sources yield zero, which correctly
    /// small-signal-shorts them.
    pub fn ac_phasor(&self) -> Complex<f64> {
        from_polar_deg(self.ac_mag, self.ac_phase_deg)
    }

    /// Stamp into a real MNA system with the source value at time t.
    pub fn stamp_at_time(&self, mna: &mut MnaSystem, t: f64) {
        mna.stamp_voltage_source(
            self.node_pos.matrix_index(),
            self.node_neg.matrix_index(),
            self.branch_index,
            self.value_at(t),
        );
    }

    /// Stamp into a complex MNA system with the AC phasor.
    pub fn stamp_ac(&self, mna: &mut ComplexMna) {
        mna.stamp_voltage_source(
            self.node_pos.matrix_index(),
            self.node_neg.matrix_index(),
            self.branch_index,
            self.ac_phasor(),
        );
    }
}
