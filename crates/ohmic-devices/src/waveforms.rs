//! Time-varying source waveforms for transient analysis.
//!
//! A waveform is a pure function of time, represented as data so sources
//! stay freely clonable and the evaluation has no captured environment.

use ohmic_core::EPS;

/// A time-varying waveform specification.
#[derive(Debug, Clone)]
pub enum Waveform {
    /// Constant value (time-independent).
    Dc(f64),

    /// Pulse waveform: PULSE(V1 V2 TD TR TF PW PER [NCYCLES])
    ///
    /// - V1: Initial value
    /// - V2: Pulsed value
    /// - TD: Delay time (before the first pulse)
    /// - TR: Rise time
    /// - TF: Fall time
    /// - PW: Pulse width (at V2)
    /// - PER: Period
    /// - NCYCLES: Optional cycle cap (unbounded if absent)
    Pulse {
        v1: f64,
        v2: f64,
        td: f64,
        tr: f64,
        tf: f64,
        pw: f64,
        per: f64,
        ncycles: Option<u64>,
    },

    /// Piecewise linear waveform: PWL(T1 V1 T2 V2 ...)
    ///
    /// Linear interpolation between points, clamped to the first value
    /// before T1 and the last value after TN.
    Pwl {
        /// Time-value pairs, sorted by time.
        points: Vec<(f64, f64)>,
    },
}

impl Waveform {
    /// Create a pulse waveform with an unbounded cycle count.
    pub fn pulse(v1: f64, v2: f64, td: f64, tr: f64, tf: f64, pw: f64, per: f64) -> Self {
        Waveform::Pulse {
            v1,
            v2,
            td,
            tr,
            tf,
            pw,
            per,
            ncycles: None,
        }
    }

    /// Create a piecewise linear waveform.
    pub fn pwl(points: Vec<(f64, f64)>) -> Self {
        Waveform::Pwl { points }
    }

    /// Evaluate the waveform at a given time. Never fails.
    pub fn value_at(&self, time: f64) -> f64 {
        match self {
            Waveform::Dc(v) => *v,
            Waveform::Pulse {
                v1,
                v2,
                td,
                tr,
                tf,
                pw,
                per,
                ncycles,
            } => eval_pulse(*v1, *v2, *td, *tr, *tf, *pw, *per, *ncycles, time),
            Waveform::Pwl { points } => eval_pwl(points, time),
        }
    }
}

/// Evaluate a pulse waveform at time t.
#[allow(clippy::too_many_arguments)]
fn eval_pulse(
    v1: f64,
    v2: f64,
    td: f64,
    tr: f64,
    tf: f64,
    pw: f64,
    per: f64,
    ncycles: Option<u64>,
    t: f64,
) -> f64 {
    if t < td {
        return v1;
    }

    let tt = t - td;
    let (cycle, tc) = if per > EPS {
        let k = (tt / per).floor();
        (k, tt - k * per)
    } else {
        (0.0, tt)
    };

    if let Some(n) = ncycles {
        if cycle >= n as f64 {
            return v1;
        }
    }

    // Transition times below epsilon are clamped for the division.
    let tr = tr.max(EPS);
    let tf = tf.max(EPS);

    if tc < tr {
        // Rising edge
        v1 + (v2 - v1) * tc / tr
    } else if tc < tr + pw {
        // Pulse high
        v2
    } else if tc < tr + pw + tf {
        // Falling edge
        v2 - (v2 - v1) * (tc - tr - pw) / tf
    } else {
        // Pulse low
        v1
    }
}

/// Evaluate a piecewise linear waveform at time t.
fn eval_pwl(points: &[(f64, f64)], t: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }

    if t <= points[0].0 {
        return points[0].1;
    }
    if t >= points[points.len() - 1].0 {
        return points[points.len() - 1].1;
    }

    for i in 0..points.len() - 1 {
        let (t0, v0) = points[i];
        let (t1, v1) = points[i + 1];

        if t >= t0 && t <= t1 {
            let frac = (t - t0) / (t1 - t0).max(EPS);
            return v0 + frac * (v1 - v0);
        }
    }

    points[points.len() - 1].1
}
