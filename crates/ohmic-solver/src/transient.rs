//! Transient analysis engine.
//!
//! Time steps over a uniform grid; each step runs a Newton-Raphson loop
//! that reassembles the full MNA system around the current linearization
//! point. Reactive elements enter through backward-Euler companion models,
//! diodes through their linearized Shockley stamp, switches through their
//! state-dependent resistance. A switch toggle invalidates the iterate and
//! forces another pass through assembly; convergence requires a quiet
//! switch set plus a small solution delta.

use indexmap::IndexMap;
use nalgebra::DVector;
use ohmic_core::mna::MnaSystem;
use ohmic_core::{EPS, NodeId};
use ohmic_devices::{Circuit, TranSweep};

use crate::error::{Error, Result};
use crate::linear::solve_real;

/// Newton iteration budget per time step.
pub const MAX_NEWTON_ITERATIONS: usize = 20;

/// Convergence threshold on the max-abs solution change.
pub const NEWTON_TOLERANCE: f64 = 1e-6;

/// Result of a transient analysis.
///
/// `times`, every node series, and every element series share one entry
/// per grid point, from t = 0 to tstop inclusive. When probes are set,
/// `node_voltages` is filtered to the probed nodes; element currents are
/// never filtered.
#[derive(Debug, Clone)]
pub struct TranResult {
    /// Time grid (s).
    pub times: Vec<f64>,
    /// Node voltage per time point, keyed by node name.
    pub node_voltages: IndexMap<String, Vec<f64>>,
    /// Element current per time point, keyed by element name.
    pub element_currents: IndexMap<String, Vec<f64>>,
}

impl TranResult {
    /// Voltage series for a node (case-insensitive name match).
    pub fn voltage(&self, node: &str) -> Option<&Vec<f64>> {
        self.node_voltages
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(node))
            .map(|(_, s)| s)
    }

    /// Current series for an element (case-insensitive name match).
    pub fn current(&self, element: &str) -> Option<&Vec<f64>> {
        self.element_currents
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(element))
            .map(|(_, s)| s)
    }
}

/// Normalize the requested sweep into (dt, steps).
///
/// A requested step below epsilon falls back to tstop/1000. The count is
/// rounded up and dt recomputed so the grid ends exactly at tstop.
fn time_grid(sweep: &TranSweep) -> Result<(f64, usize)> {
    if sweep.tstop <= 0.0 {
        return Err(Error::BadAnalysis(".tran requires a positive stop time".into()));
    }

    let dt_eff = if sweep.tstep > EPS {
        sweep.tstep
    } else {
        (sweep.tstop / 1000.0).max(EPS)
    };
    let steps = ((sweep.tstop / dt_eff).ceil() as usize).max(1);

    Ok((sweep.tstop / steps as f64, steps))
}

/// Run a transient analysis over the circuit's `.TRAN` sweep.
///
/// Returns `Ok(None)` when the circuit carries no transient request.
/// Mutates only element state: companion histories, switch states, and
/// diode seed voltages, which afterwards hold their post-tstop values.
pub fn run_transient(circuit: &mut Circuit) -> Result<Option<TranResult>> {
    let Some(sweep) = circuit.tran.clone() else {
        return Ok(None);
    };
    let (dt, steps) = time_grid(&sweep)?;

    let num_nodes = circuit.num_unknown_nodes();
    let num_branches = circuit.num_branches();
    let size = num_nodes + num_branches;

    let element_names: Vec<String> = circuit
        .resistors
        .iter()
        .map(|r| r.name.clone())
        .chain(circuit.capacitors.iter().map(|c| c.name.clone()))
        .chain(circuit.inductors.iter().map(|l| l.name.clone()))
        .chain(circuit.vsources.iter().map(|v| v.name.clone()))
        .chain(circuit.switches.iter().map(|s| s.name.clone()))
        .chain(circuit.diodes.iter().map(|d| d.name.clone()))
        .collect();

    let mut times = Vec::with_capacity(steps + 1);
    let mut node_series = vec![Vec::with_capacity(steps + 1); num_nodes];
    let mut element_series = vec![Vec::with_capacity(steps + 1); element_names.len()];

    let mut mna = MnaSystem::new(num_nodes, num_branches);
    let mut x: DVector<f64> = DVector::zeros(size);

    for step in 0..=steps {
        let t = step as f64 * dt;

        let mut converged = false;
        for iter in 0..MAX_NEWTON_ITERATIONS {
            mna.clear();

            for r in &circuit.resistors {
                r.stamp(&mut mna);
            }
            for c in &circuit.capacitors {
                c.stamp_companion(&mut mna, dt);
            }
            for l in &circuit.inductors {
                l.stamp_companion(&mut mna, dt);
            }
            for s in &circuit.switches {
                s.stamp(&mut mna);
            }
            for d in &circuit.diodes {
                // Iteration 0 seeds from the previous step's diode voltage;
                // later iterations from the last Newton iterate.
                let vd = if iter == 0 {
                    d.vd_prev
                } else {
                    vdiff(&x, d.node_pos, d.node_neg)
                };
                d.stamp_linearized(&mut mna, vd);
            }
            for v in &circuit.vsources {
                v.stamp_at_time(&mut mna, t);
            }

            let x_next = solve_real(&mna.matrix, &mna.rhs)?;

            let mut toggled = false;
            for s in &mut circuit.switches {
                let vc = vdiff(&x_next, s.ctrl_pos, s.ctrl_neg);
                toggled |= s.update(vc);
            }

            let delta = max_abs_delta(&x, &x_next);
            x = x_next;

            if !toggled && delta < NEWTON_TOLERANCE {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Error::NonConvergence { time: t });
        }

        // Record the converged point.
        times.push(t);
        for (idx, series) in node_series.iter_mut().enumerate() {
            series.push(x[idx]);
        }

        let mut k = 0;
        for r in &circuit.resistors {
            let v = vdiff(&x, r.node_pos, r.node_neg);
            element_series[k].push(v / r.resistance);
            k += 1;
        }
        for c in &circuit.capacitors {
            let v = vdiff(&x, c.node_pos, c.node_neg);
            element_series[k].push(c.current(v, dt));
            k += 1;
        }
        for l in &circuit.inductors {
            let v = vdiff(&x, l.node_pos, l.node_neg);
            element_series[k].push(l.current(v, dt));
            k += 1;
        }
        for v in &circuit.vsources {
            element_series[k].push(x[v.branch_index]);
            k += 1;
        }
        for s in &circuit.switches {
            let v = vdiff(&x, s.node_pos, s.node_neg);
            element_series[k].push(s.current(v));
            k += 1;
        }
        for d in &circuit.diodes {
            // Reported from the unclamped post-iteration voltage.
            let v = vdiff(&x, d.node_pos, d.node_neg);
            element_series[k].push(d.model.current_at(v));
            k += 1;
        }

        // Advance element state to this step.
        for c in &mut circuit.capacitors {
            let v = vdiff(&x, c.node_pos, c.node_neg);
            c.update_state(v, dt);
        }
        for l in &mut circuit.inductors {
            let v = vdiff(&x, l.node_pos, l.node_neg);
            l.update_state(v, dt);
        }
        for d in &mut circuit.diodes {
            d.vd_prev = vdiff(&x, d.node_pos, d.node_neg);
        }
    }

    let mut node_voltages: IndexMap<String, Vec<f64>> = circuit
        .nodes
        .non_ground()
        .map(|(_, name)| name.to_string())
        .zip(node_series)
        .collect();
    if !circuit.probes.is_empty() {
        let probes = &circuit.probes;
        node_voltages.retain(|name, _| probes.iter().any(|p| p.eq_ignore_ascii_case(name)));
    }

    let element_currents: IndexMap<String, Vec<f64>> =
        element_names.into_iter().zip(element_series).collect();

    Ok(Some(TranResult {
        times,
        node_voltages,
        element_currents,
    }))
}

/// Terminal voltage difference from a solution vector, ground reading 0.
fn vdiff(solution: &DVector<f64>, pos: NodeId, neg: NodeId) -> f64 {
    let vp = pos.matrix_index().map(|i| solution[i]).unwrap_or(0.0);
    let vn = neg.matrix_index().map(|i| solution[i]).unwrap_or(0.0);
    vp - vn
}

/// Max-abs componentwise change between two iterates.
fn max_abs_delta(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_grid_uses_requested_step() {
        let (dt, steps) = time_grid(&TranSweep {
            tstep: 2.5e-6,
            tstop: 1e-5,
        })
        .unwrap();
        assert_eq!(steps, 4);
        assert!((dt - 2.5e-6).abs() < 1e-18);
    }

    #[test]
    fn test_time_grid_ends_exactly_at_tstop() {
        // 3us step into 10us rounds up to 4 steps of 2.5us.
        let (dt, steps) = time_grid(&TranSweep {
            tstep: 3e-6,
            tstop: 1e-5,
        })
        .unwrap();
        assert_eq!(steps, 4);
        assert!((dt * steps as f64 - 1e-5).abs() < 1e-18);
    }

    #[test]
    fn test_time_grid_default_step() {
        // No step requested: default to tstop/1000.
        let (dt, steps) = time_grid(&TranSweep {
            tstep: 0.0,
            tstop: 1.0,
        })
        .unwrap();
        assert_eq!(steps, 1000);
        assert!((dt - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_time_grid_rejects_nonpositive_tstop() {
        let result = time_grid(&TranSweep {
            tstep: 1e-6,
            tstop: 0.0,
        });
        assert!(matches!(result, Err(Error::BadAnalysis(_))));
    }

    #[test]
    fn test_max_abs_delta() {
        let a = DVector::from_vec(vec![1.0, 2.0, -3.0]);
        let b = DVector::from_vec(vec![1.5, 2.0, -3.25]);
        assert!((max_abs_delta(&a, &b) - 0.5).abs() < 1e-15);

        let empty = DVector::<f64>::zeros(0);
        assert_eq!(max_abs_delta(&empty, &empty), 0.0);
    }
}
