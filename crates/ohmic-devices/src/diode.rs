//! Diode device model using the Shockley equation.

use ohmic_core::mna::MnaSystem;
use ohmic_core::NodeId;

/// Thermal voltage kT/q at roughly 300 K.
pub const VTHERMAL: f64 = 0.02585;

/// Soft limits applied to the diode voltage before the exponential, to
/// keep exp() inside double range during Newton iteration.
const VD_MIN: f64 = -1.0;
const VD_MAX: f64 = 0.8;

/// Conductance floor for numerical stability of the linearized stamp.
const GMIN: f64 = 1e-12;

/// Diode model parameters from a `.MODEL ... D` definition.
#[derive(Debug, Clone)]
pub struct DiodeModel {
    /// Saturation current Is (A).
    pub is_sat: f64,
    /// Emission coefficient N.
    pub emission: f64,
}

impl Default for DiodeModel {
    fn default() -> Self {
        Self {
            is_sat: 1e-14,
            emission: 1.0,
        }
    }
}

impl DiodeModel {
    /// N * Vt, the exponential slope voltage.
    pub fn nvt(&self) -> f64 {
        self.emission * VTHERMAL
    }

    /// Shockley current Is * (exp(vd / (N*Vt)) - 1) at an unclamped
    /// voltage. Used for reporting, not for linearization.
    pub fn current_at(&self, vd: f64) -> f64 {
        self.is_sat * ((vd / self.nvt()).exp() - 1.0)
    }
}

/// A diode element.
#[derive(Debug, Clone)]
pub struct Diode {
    /// Device name (e.g., "D1").
    pub name: String,
    /// Anode node.
    pub node_pos: NodeId,
    /// Cathode node.
    pub node_neg: NodeId,
    /// Model parameters.
    pub model: DiodeModel,
    /// Diode voltage at the previous timestep; seeds Newton iteration 0.
    pub vd_prev: f64,
}

impl Diode {
    /// Create a new diode with zeroed seed voltage.
    pub fn new(
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        model: DiodeModel,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            model,
            vd_prev: 0.0,
        }
    }

    /// Evaluate current and small-signal conductance at a clamped
    /// operating point.
    ///
    /// Returns (id, gd) where:
    /// - id = Is * (exp(vd / (N*Vt)) - 1)
    /// - gd = max(Is / (N*Vt) * exp(vd / (N*Vt)), GMIN)
    pub fn evaluate(&self, vd: f64) -> (f64, f64) {
        let nvt = self.model.nvt();
        let vd = vd.clamp(VD_MIN, VD_MAX);

        let expv = (vd / nvt).exp();
        let id = self.model.is_sat * (expv - 1.0);
        let gd = (self.model.is_sat * expv / nvt).max(GMIN);

        (id, gd)
    }

    /// Stamp the companion model linearized at `vd`.
    ///
    /// The diode becomes a conductance gd in parallel with a current
    /// source ieq = id - gd*vd injected from anode to cathode, both
    /// evaluated at the clamped operating point.
    pub fn stamp_linearized(&self, mna: &mut MnaSystem, vd: f64) {
        let vd = vd.clamp(VD_MIN, VD_MAX);
        let (id, gd) = self.evaluate(vd);
        let ieq = id - gd * vd;

        let i = self.node_pos.matrix_index();
        let j = self.node_neg.matrix_index();

        mna.stamp_conductance(i, j, gd);
        mna.stamp_current_source(i, j, ieq);
    }
}
