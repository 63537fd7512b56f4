//! Device models and the circuit container for Ohmic.
//!
//! This crate provides:
//! - Passive elements: R, C, L (with companion-model history)
//! - Independent voltage sources with PULSE/PWL waveforms
//! - Voltage-controlled switches with hysteresis
//! - Shockley diodes
//! - The [`Circuit`] container tying elements to analyses and probes

pub mod circuit;
pub mod diode;
pub mod passive;
pub mod sources;
pub mod switch;
pub mod waveforms;

pub use circuit::{AcSweep, AcSweepMode, Circuit, TranSweep};
pub use diode::{Diode, DiodeModel, VTHERMAL};
pub use passive::{Capacitor, Inductor, Resistor};
pub use sources::VoltageSource;
pub use switch::{Switch, SwitchModel};
pub use waveforms::Waveform;
