//! # Ohmic
//!
//! A compact SPICE-class circuit simulator written in Rust.
//!
//! Ohmic parses a textual netlist of passive elements (R, C, L),
//! independent voltage sources with PULSE/PWL waveforms,
//! voltage-controlled switches, and Shockley diodes, then runs:
//!
//! - **AC analysis** - complex phasor node voltages and element currents
//!   over a frequency sweep
//! - **Transient analysis** - time-domain simulation with backward-Euler
//!   companion models and Newton-Raphson resolution of diodes and
//!   switches
//!
//! ## Quick start
//!
//! ```rust
//! // The first netlist line is the title, per SPICE convention.
//! let report = ohmic::simulate(
//!     "Voltage Divider\n\
//!      V1 1 0 DC 10\n\
//!      R1 1 2 1k\n\
//!      R2 2 0 1k\n\
//!      .tran 1u 1m\n\
//!      .end\n",
//! )
//! .unwrap();
//!
//! let tran = report.tran.unwrap();
//! let v2 = tran.voltage("2").unwrap();
//! assert!((v2.last().unwrap() - 5.0).abs() < 1e-9);
//! ```

use thiserror::Error;

// Re-export the component crates.
pub use ohmic_core as core;
pub use ohmic_devices as devices;
pub use ohmic_parser as parser;
pub use ohmic_solver as solver;

// Convenient re-exports of the main types.
pub use ohmic_core::{NodeId, NodeIndex};
pub use ohmic_core::mna::{ComplexMna, MnaSystem};
pub use ohmic_devices::{
    AcSweep, AcSweepMode, Capacitor, Circuit, Diode, DiodeModel, Inductor, Resistor, Switch,
    SwitchModel, TranSweep, VoltageSource, Waveform,
};
pub use ohmic_parser::parse;
pub use ohmic_solver::{AcResult, TranResult, run_ac, run_transient};

/// Re-export of nalgebra's dynamic vector and matrix types.
pub use nalgebra::{DMatrix, DVector};

/// Re-export of num_complex's Complex type.
pub use num_complex::Complex;

/// Errors from the combined parse-and-simulate entry point.
#[derive(Debug, Error)]
pub enum SimulateError {
    #[error(transparent)]
    Parse(#[from] ohmic_parser::Error),

    #[error(transparent)]
    Solve(#[from] ohmic_solver::Error),
}

/// Results of every analysis a netlist requested.
#[derive(Debug)]
pub struct SimulationReport {
    /// AC result, present when the netlist carried an `.AC` command.
    pub ac: Option<AcResult>,
    /// Transient result, present when the netlist carried `.TRAN`.
    pub tran: Option<TranResult>,
}

/// Parse a netlist and run whichever analyses it requests.
///
/// A circuit may request both `.AC` and `.TRAN`; AC runs first and does
/// not disturb element state, so both see the same initial circuit.
pub fn simulate(netlist: &str) -> Result<SimulationReport, SimulateError> {
    let mut circuit = parse(netlist)?;
    let ac = run_ac(&circuit)?;
    let tran = run_transient(&mut circuit)?;
    Ok(SimulationReport { ac, tran })
}

/// Prelude module containing the commonly used types and entry points.
///
/// ```rust
/// use ohmic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AcResult, AcSweep, AcSweepMode, Circuit, NodeId, SimulationReport, TranResult, TranSweep,
        Waveform, parse, run_ac, run_transient, simulate,
    };
    pub use crate::{Complex, DMatrix, DVector};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_runs_requested_analyses() {
        let report = simulate(
            "RC\n\
             V1 1 0 DC 5 AC 1\n\
             R1 1 2 1k\n\
             C1 2 0 1u\n\
             .ac dec 10 10 1000\n\
             .tran 10u 1m\n\
             .end\n",
        )
        .unwrap();

        assert!(report.ac.is_some());
        assert!(report.tran.is_some());
    }

    #[test]
    fn test_simulate_without_analyses() {
        let report = simulate("t\nV1 1 0 5\nR1 1 0 1k\n.end\n").unwrap();
        assert!(report.ac.is_none());
        assert!(report.tran.is_none());
    }

    #[test]
    fn test_parse_error_propagates() {
        let result = simulate("t\nD1 1 0 nomodel\n.end\n");
        assert!(matches!(result, Err(SimulateError::Parse(_))));
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let _ = NodeId::GROUND;
        let mut circuit = Circuit::new();
        circuit.nodes.intern("out");
        assert_eq!(circuit.num_unknown_nodes(), 1);
    }
}
