//! Core data structures for the Ohmic circuit simulator.
//!
//! This crate provides the pieces every analysis builds on:
//!
//! - [`NodeId`] / [`NodeIndex`] - dense node ids with case-insensitive
//!   name lookup (ground is always id 0)
//! - [`MnaSystem`](mna::MnaSystem) / [`ComplexMna`](mna::ComplexMna) - the
//!   real and complex MNA matrix equations Ax = b with additive stamping
//!   primitives
//! - [`units::parse_value`] - SPICE SI-suffix value parsing
//! - [`complex`] - phasor construction and guarded complex division
//!
//! # Modified Nodal Analysis
//!
//! The system `Ax = b` carries one unknown per non-ground node voltage plus
//! one branch-current unknown per voltage source. A node's matrix index is
//! `id - 1`; ground never gets a row or column - stamps addressed at ground
//! are simply skipped.
//!
//! # Example
//!
//! ```rust
//! use ohmic_core::mna::MnaSystem;
//!
//! // Voltage divider: V1 = 10V into two 1k resistors.
//! let mut mna = MnaSystem::new(2, 1);
//! mna.stamp_voltage_source(Some(0), None, 2, 10.0);
//! mna.stamp_conductance(Some(0), Some(1), 1e-3);
//! mna.stamp_conductance(Some(1), None, 1e-3);
//!
//! assert_eq!(mna.size(), 3);
//! ```

pub mod complex;
pub mod error;
pub mod mna;
pub mod node;
pub mod units;

pub use complex::{EPS, checked_div, checked_recip, from_polar_deg};
pub use error::{Error, Result};
pub use node::{NodeId, NodeIndex};
