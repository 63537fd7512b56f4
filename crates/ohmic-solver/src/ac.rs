//! AC small-signal frequency-domain analysis.

use std::f64::consts::PI;

use indexmap::IndexMap;
use num_complex::Complex;
use ohmic_core::mna::ComplexMna;
use ohmic_core::{EPS, NodeId};
use ohmic_devices::{AcSweep, AcSweepMode, Circuit};

use crate::error::{Error, Result};
use crate::linear::solve_complex;

/// Result of an AC analysis.
///
/// Every series has one entry per frequency, keyed by the node's or
/// element's display name in a fixed order (nodes by id; elements as
/// R, C, L, V).
#[derive(Debug, Clone)]
pub struct AcResult {
    /// Swept frequencies (Hz).
    pub freqs: Vec<f64>,
    /// Complex node voltage per frequency, keyed by node name.
    pub node_voltages: IndexMap<String, Vec<Complex<f64>>>,
    /// Complex element current per frequency, keyed by element name.
    pub element_currents: IndexMap<String, Vec<Complex<f64>>>,
}

impl AcResult {
    /// Voltage magnitudes for a node (case-insensitive name match).
    pub fn magnitude(&self, node: &str) -> Option<Vec<f64>> {
        self.node_series(node)
            .map(|s| s.iter().map(|v| v.norm()).collect())
    }

    /// Voltage phases in degrees for a node (case-insensitive).
    pub fn phase_deg(&self, node: &str) -> Option<Vec<f64>> {
        self.node_series(node)
            .map(|s| s.iter().map(|v| v.arg() * 180.0 / PI).collect())
    }

    fn node_series(&self, node: &str) -> Option<&Vec<Complex<f64>>> {
        self.node_voltages
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(node))
            .map(|(_, s)| s)
    }
}

/// Generate the frequency list for a sweep.
///
/// Decade mode spaces points logarithmically at `num_points` per decade
/// and appends the stop frequency when the spacing undershoots it. Linear
/// mode emits at least two points, inclusive of both endpoints.
pub fn frequency_sweep(sweep: &AcSweep) -> Result<Vec<f64>> {
    if sweep.fstart <= 0.0 || sweep.fstop <= 0.0 {
        return Err(Error::BadAnalysis(
            ".ac requires positive start and stop frequencies".into(),
        ));
    }

    match sweep.mode {
        AcSweepMode::Decade => {
            let per_decade = sweep.num_points.max(1) as f64;
            let decades = (sweep.fstop / sweep.fstart).log10();
            let n = ((decades * per_decade).ceil() as usize).max(1);

            let mut freqs: Vec<f64> = (0..=n)
                .map(|i| sweep.fstart * 10f64.powf(i as f64 / per_decade))
                .collect();
            if let Some(&last) = freqs.last() {
                if last < sweep.fstop * (1.0 - EPS) {
                    freqs.push(sweep.fstop);
                }
            }
            Ok(freqs)
        }
        AcSweepMode::Linear => {
            let n = sweep.num_points.max(2);
            let step = (sweep.fstop - sweep.fstart) / (n as f64 - 1.0);
            Ok((0..n).map(|i| sweep.fstart + step * i as f64).collect())
        }
    }
}

/// Run an AC analysis over the circuit's `.AC` sweep.
///
/// Returns `Ok(None)` when the circuit carries no AC request. For each
/// frequency the complex MNA system is reassembled from scratch:
/// resistors as 1/R, capacitors as jwC, inductors as 1/(jwL) (degenerate
/// impedances stamp nothing), voltage sources as their AC phasor.
/// Switches and diodes contribute nothing to the small-signal system.
/// Element state is not mutated.
pub fn run_ac(circuit: &Circuit) -> Result<Option<AcResult>> {
    let Some(sweep) = &circuit.ac else {
        return Ok(None);
    };
    let freqs = frequency_sweep(sweep)?;

    for r in &circuit.resistors {
        if r.resistance <= 0.0 {
            return Err(Error::BadElementValue {
                name: r.name.clone(),
                value: r.resistance,
            });
        }
    }

    let num_nodes = circuit.num_unknown_nodes();
    let num_branches = circuit.num_branches();

    // One series per node (id order) and per element (R, C, L, V order).
    let mut node_series = vec![Vec::with_capacity(freqs.len()); num_nodes];
    let element_names: Vec<&str> = circuit
        .resistors
        .iter()
        .map(|r| r.name.as_str())
        .chain(circuit.capacitors.iter().map(|c| c.name.as_str()))
        .chain(circuit.inductors.iter().map(|l| l.name.as_str()))
        .chain(circuit.vsources.iter().map(|v| v.name.as_str()))
        .collect();
    let mut element_series = vec![Vec::with_capacity(freqs.len()); element_names.len()];

    let mut mna = ComplexMna::new(num_nodes, num_branches);

    for &freq in &freqs {
        let omega = 2.0 * PI * freq;
        mna.clear();

        for r in &circuit.resistors {
            mna.stamp_admittance(
                r.node_pos.matrix_index(),
                r.node_neg.matrix_index(),
                r.ac_admittance(),
            );
        }
        for c in &circuit.capacitors {
            mna.stamp_admittance(
                c.node_pos.matrix_index(),
                c.node_neg.matrix_index(),
                c.ac_admittance(omega),
            );
        }
        for l in &circuit.inductors {
            mna.stamp_admittance(
                l.node_pos.matrix_index(),
                l.node_neg.matrix_index(),
                l.ac_admittance(omega),
            );
        }
        for v in &circuit.vsources {
            v.stamp_ac(&mut mna);
        }

        let solution = solve_complex(&mna.matrix, &mna.rhs)?;

        for (idx, series) in node_series.iter_mut().enumerate() {
            series.push(solution[idx]);
        }

        // Element currents, same order as element_names.
        let mut k = 0;
        for r in &circuit.resistors {
            let v = vdiff(&solution, r.node_pos, r.node_neg);
            element_series[k].push(r.ac_admittance() * v);
            k += 1;
        }
        for c in &circuit.capacitors {
            let v = vdiff(&solution, c.node_pos, c.node_neg);
            element_series[k].push(c.ac_admittance(omega) * v);
            k += 1;
        }
        for l in &circuit.inductors {
            let v = vdiff(&solution, l.node_pos, l.node_neg);
            element_series[k].push(l.ac_admittance(omega) * v);
            k += 1;
        }
        for v in &circuit.vsources {
            element_series[k].push(solution[v.branch_index]);
            k += 1;
        }
    }

    let node_voltages: IndexMap<String, Vec<Complex<f64>>> = circuit
        .nodes
        .non_ground()
        .map(|(_, name)| name.to_string())
        .zip(node_series)
        .collect();
    let element_currents: IndexMap<String, Vec<Complex<f64>>> = element_names
        .into_iter()
        .map(str::to_string)
        .zip(element_series)
        .collect();

    Ok(Some(AcResult {
        freqs,
        node_voltages,
        element_currents,
    }))
}

fn vdiff(solution: &nalgebra::DVector<Complex<f64>>, pos: NodeId, neg: NodeId) -> Complex<f64> {
    let zero = Complex::new(0.0, 0.0);
    let vp = pos.matrix_index().map(|i| solution[i]).unwrap_or(zero);
    let vn = neg.matrix_index().map(|i| solution[i]).unwrap_or(zero);
    vp - vn
}
