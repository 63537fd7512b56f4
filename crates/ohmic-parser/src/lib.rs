//! SPICE netlist parser for Ohmic.
//!
//! Parses a netlist string into a finalized
//! [`Circuit`](ohmic_devices::Circuit): element lines (R, C, L, V, S, D),
//! `.MODEL` definitions for switches and diodes, and the `.AC`, `.TRAN`,
//! and `.PRINT` commands.
//!
//! # Example
//!
//! ```
//! use ohmic_parser::parse;
//!
//! let circuit = parse(
//!     "Voltage Divider\n\
//!      V1 1 0 DC 10\n\
//!      R1 1 2 1k\n\
//!      R2 2 0 1k\n\
//!      .tran 1u 1m\n\
//!      .end\n",
//! )
//! .unwrap();
//!
//! assert_eq!(circuit.resistors.len(), 2);
//! assert!(circuit.tran.is_some());
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{Error, Result};
pub use parser::parse;
