//! Voltage-controlled switch model.
//!
//! A switch is a two-state resistor: `ron` when ON, `roff` when OFF,
//! driven by the voltage between its control nodes. Hysteresis comes from
//! `von > voff`; the state persists across Newton iterations and time
//! steps, and a toggle forces the Newton loop back through assembly.

use ohmic_core::mna::MnaSystem;
use ohmic_core::{EPS, NodeId};

/// Comparison tolerance for the threshold checks.
const CONTROL_TOL: f64 = 1e-6;

/// Switch model parameters from a `.MODEL ... SW|VSWITCH` definition.
#[derive(Debug, Clone)]
pub struct SwitchModel {
    /// ON resistance (ohms).
    pub ron: f64,
    /// OFF resistance (ohms).
    pub roff: f64,
    /// Turn-on threshold voltage (V).
    pub von: f64,
    /// Turn-off threshold voltage (V).
    pub voff: f64,
}

impl Default for SwitchModel {
    fn default() -> Self {
        Self {
            ron: 1.0,
            roff: 1e6,
            von: 1.0,
            voff: 0.0,
        }
    }
}

impl SwitchModel {
    /// Derive thresholds from a center voltage and hysteresis width:
    /// `von = vt + vh/2`, `voff = vt - vh/2`.
    pub fn from_thresholds(vt: f64, vh: f64) -> Self {
        Self {
            von: vt + vh / 2.0,
            voff: vt - vh / 2.0,
            ..Default::default()
        }
    }
}

/// A voltage-controlled switch element.
#[derive(Debug, Clone)]
pub struct Switch {
    /// Device name (e.g., "S1").
    pub name: String,
    /// Positive terminal node.
    pub node_pos: NodeId,
    /// Negative terminal node.
    pub node_neg: NodeId,
    /// Positive control node.
    pub ctrl_pos: NodeId,
    /// Negative control node.
    pub ctrl_neg: NodeId,
    /// Model parameters.
    pub model: SwitchModel,
    /// Discrete state; starts OFF.
    pub is_on: bool,
}

impl Switch {
    /// Create a new switch in the OFF state.
    pub fn new(
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        ctrl_pos: NodeId,
        ctrl_neg: NodeId,
        model: SwitchModel,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            ctrl_pos,
            ctrl_neg,
            model,
            is_on: false,
        }
    }

    /// Effective resistance for the current state, floored at epsilon.
    pub fn effective_resistance(&self) -> f64 {
        let r = if self.is_on {
            self.model.ron
        } else {
            self.model.roff
        };
        r.abs().max(EPS)
    }

    /// Stamp the state-dependent conductance.
    pub fn stamp(&self, mna: &mut MnaSystem) {
        mna.stamp_conductance(
            self.node_pos.matrix_index(),
            self.node_neg.matrix_index(),
            1.0 / self.effective_resistance(),
        );
    }

    /// Update the state from a control voltage. Returns true if the state
    /// changed, which invalidates the current Newton iterate.
    pub fn update(&mut self, vc: f64) -> bool {
        let was_on = self.is_on;
        if self.is_on {
            if vc <= self.model.voff + CONTROL_TOL {
                self.is_on = false;
            }
        } else if vc >= self.model.von - CONTROL_TOL {
            self.is_on = true;
        }
        self.is_on != was_on
    }

    /// Branch current at terminal voltage `v`.
    pub fn current(&self, v: f64) -> f64 {
        v / self.effective_resistance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_switch(model: SwitchModel) -> Switch {
        Switch::new(
            "S1",
            NodeId::new(1),
            NodeId::new(2),
            NodeId::new(3),
            NodeId::GROUND,
            model,
        )
    }

    #[test]
    fn test_thresholds_from_vt_vh() {
        let m = SwitchModel::from_thresholds(1.5, 1.0);
        assert!((m.von - 2.0).abs() < 1e-12);
        assert!((m.voff - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_starts_off() {
        let s = test_switch(SwitchModel::default());
        assert!(!s.is_on);
        assert_eq!(s.effective_resistance(), 1e6);
    }

    #[test]
    fn test_hysteresis_cycle() {
        let mut s = test_switch(SwitchModel {
            ron: 1.0,
            roff: 1e9,
            von: 2.0,
            voff: 1.0,
        });

        // Below von: stays off.
        assert!(!s.update(1.5));
        assert!(!s.is_on);

        // Crosses von: turns on.
        assert!(s.update(2.5));
        assert!(s.is_on);

        // Inside the hysteresis band: stays on.
        assert!(!s.update(1.5));
        assert!(s.is_on);

        // Drops below voff: turns off.
        assert!(s.update(0.5));
        assert!(!s.is_on);
    }

    #[test]
    fn test_threshold_tolerance() {
        let mut s = test_switch(SwitchModel {
            ron: 1.0,
            roff: 1e9,
            von: 2.0,
            voff: 1.0,
        });

        // Exactly at von counts as a turn-on.
        assert!(s.update(2.0));
        assert!(s.is_on);

        // Exactly at voff counts as a turn-off.
        assert!(s.update(1.0));
        assert!(!s.is_on);
    }

    #[test]
    fn test_stamp_uses_state_resistance() {
        let mut s = Switch::new(
            "S1",
            NodeId::new(1),
            NodeId::GROUND,
            NodeId::new(2),
            NodeId::GROUND,
            SwitchModel {
                ron: 2.0,
                roff: 1e6,
                von: 1.0,
                voff: 0.0,
            },
        );
        s.is_on = true;

        let mut mna = MnaSystem::new(2, 0);
        s.stamp(&mut mna);

        assert!((mna.matrix[(0, 0)] - 0.5).abs() < 1e-12);
    }
}
