//! Passive device models: Resistor, Capacitor, Inductor.
//!
//! Capacitors and inductors carry their own companion-model history
//! (`v_prev`, `i_prev`), updated by the transient engine after every step.
//! The discretization is backward Euler throughout; the stamp and the state
//! update use the same scheme.

use num_complex::Complex;
use ohmic_core::checked_recip;
use ohmic_core::mna::MnaSystem;
use ohmic_core::NodeId;

/// A resistor element.
#[derive(Debug, Clone)]
pub struct Resistor {
    /// Device name (e.g., "R1").
    pub name: String,
    /// Positive terminal node.
    pub node_pos: NodeId,
    /// Negative terminal node.
    pub node_neg: NodeId,
    /// Resistance value in ohms.
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        resistance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            resistance,
        }
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Stamp the conductance into a real MNA system.
    pub fn stamp(&self, mna: &mut MnaSystem) {
        mna.stamp_conductance(
            self.node_pos.matrix_index(),
            self.node_neg.matrix_index(),
            self.conductance(),
        );
    }

    /// AC admittance (frequency-independent).
    pub fn ac_admittance(&self) -> Complex<f64> {
        Complex::new(self.conductance(), 0.0)
    }
}

/// A capacitor element with companion-model state.
#[derive(Debug, Clone)]
pub struct Capacitor {
    /// Device name (e.g., "C1").
    pub name: String,
    /// Positive terminal node.
    pub node_pos: NodeId,
    /// Negative terminal node.
    pub node_neg: NodeId,
    /// Capacitance value in farads.
    pub capacitance: f64,
    /// Terminal voltage at the previous timestep.
    pub v_prev: f64,
    /// Branch current at the previous timestep.
    pub i_prev: f64,
}

impl Capacitor {
    /// Create a new capacitor with zeroed history.
    pub fn new(
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        capacitance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            capacitance,
            v_prev: 0.0,
            i_prev: 0.0,
        }
    }

    /// Stamp the backward-Euler companion model.
    ///
    /// C becomes G_eq = C/h in parallel with a current source of
    /// -G_eq * v_prev injected from pos to neg.
    pub fn stamp_companion(&self, mna: &mut MnaSystem, h: f64) {
        let geq = self.capacitance / h;
        let i = self.node_pos.matrix_index();
        let j = self.node_neg.matrix_index();

        mna.stamp_conductance(i, j, geq);
        mna.stamp_current_source(i, j, -geq * self.v_prev);
    }

    /// Branch current implied by the companion model at terminal voltage
    /// `v_now` (before the state update).
    pub fn current(&self, v_now: f64, h: f64) -> f64 {
        self.capacitance * (v_now - self.v_prev) / h
    }

    /// Advance the companion history after a solved step.
    pub fn update_state(&mut self, v_now: f64, h: f64) {
        self.i_prev = self.capacitance * (v_now - self.v_prev) / h;
        self.v_prev = v_now;
    }

    /// AC admittance jwC.
    pub fn ac_admittance(&self, omega: f64) -> Complex<f64> {
        Complex::new(0.0, omega * self.capacitance)
    }
}

/// An inductor element with companion-model state.
#[derive(Debug, Clone)]
pub struct Inductor {
    /// Device name (e.g., "L1").
    pub name: String,
    /// Positive terminal node.
    pub node_pos: NodeId,
    /// Negative terminal node.
    pub node_neg: NodeId,
    /// Inductance value in henries.
    pub inductance: f64,
    /// Terminal voltage at the previous timestep.
    pub v_prev: f64,
    /// Branch current at the previous timestep.
    pub i_prev: f64,
}

impl Inductor {
    /// Create a new inductor with zeroed history.
    pub fn new(
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        inductance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            inductance,
            v_prev: 0.0,
            i_prev: 0.0,
        }
    }

    /// Companion conductance h/L for step size h.
    pub fn companion_conductance(&self, h: f64) -> f64 {
        h / self.inductance
    }

    /// Stamp the backward-Euler Norton companion model.
    ///
    /// L becomes G_eq = h/L in parallel with a current source of i_prev
    /// injected from pos to neg (same direction as the branch current).
    pub fn stamp_companion(&self, mna: &mut MnaSystem, h: f64) {
        let geq = self.companion_conductance(h);
        let i = self.node_pos.matrix_index();
        let j = self.node_neg.matrix_index();

        mna.stamp_conductance(i, j, geq);
        mna.stamp_current_source(i, j, self.i_prev);
    }

    /// Branch current implied by the companion model at terminal voltage
    /// `v_now` (before the state update).
    pub fn current(&self, v_now: f64, h: f64) -> f64 {
        self.companion_conductance(h) * v_now + self.i_prev
    }

    /// Advance the companion history after a solved step.
    pub fn update_state(&mut self, v_now: f64, h: f64) {
        self.i_prev += self.companion_conductance(h) * v_now;
        self.v_prev = v_now;
    }

    /// AC admittance 1/(jwL); zero when |jwL| is degenerate.
    pub fn ac_admittance(&self, omega: f64) -> Complex<f64> {
        let z = Complex::new(0.0, omega * self.inductance);
        checked_recip(z).unwrap_or_else(|_| Complex::new(0.0, 0.0))
    }
}
