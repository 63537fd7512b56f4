//! Analysis engines for the Ohmic circuit simulator.
//!
//! This crate provides:
//!
//! - **AC analysis** - small-signal frequency response over a complex MNA
//!   system ([`run_ac`])
//! - **Transient analysis** - time-domain simulation with backward-Euler
//!   companion models and Newton-Raphson resolution of diodes and
//!   switches ([`run_transient`])
//! - **Dense direct solvers** - Gaussian elimination with partial
//!   pivoting over real and complex entries ([`linear`])
//!
//! Both engines consume the [`Circuit`](ohmic_devices::Circuit) built by
//! the parser (or by hand) and return name-keyed result series.
//!
//! # Example
//!
//! ```rust
//! use ohmic_core::NodeId;
//! use ohmic_devices::{Circuit, Resistor, TranSweep, VoltageSource};
//! use ohmic_solver::run_transient;
//!
//! // Voltage divider: V1 = 10V over two 1k resistors.
//! let mut circuit = Circuit::new();
//! let n1 = circuit.nodes.intern("1");
//! let n2 = circuit.nodes.intern("2");
//! circuit.vsources.push(VoltageSource::new("V1", n1, NodeId::GROUND, 10.0));
//! circuit.resistors.push(Resistor::new("R1", n1, n2, 1e3));
//! circuit.resistors.push(Resistor::new("R2", n2, NodeId::GROUND, 1e3));
//! circuit.tran = Some(TranSweep { tstep: 1e-6, tstop: 1e-6 });
//! circuit.finalize();
//!
//! let result = run_transient(&mut circuit).unwrap().unwrap();
//! let v2 = result.voltage("2").unwrap();
//! assert!((v2.last().unwrap() - 5.0).abs() < 1e-9);
//! ```

pub mod ac;
pub mod error;
pub mod linear;
pub mod transient;

pub use ac::{AcResult, frequency_sweep, run_ac};
pub use error::{Error, Result};
pub use linear::{solve_complex, solve_real};
pub use transient::{MAX_NEWTON_ITERATIONS, NEWTON_TOLERANCE, TranResult, run_transient};
