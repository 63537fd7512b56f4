//! End-to-end AC tests over hand-built circuits.

use num_complex::Complex;
use ohmic_core::NodeId;
use ohmic_devices::{
    AcSweep, AcSweepMode, Capacitor, Circuit, Inductor, Resistor, VoltageSource,
};
use ohmic_solver::run_ac;

fn single_pole_rc() -> Circuit {
    let mut c = Circuit::new();
    let n1 = c.nodes.intern("1");
    let n2 = c.nodes.intern("2");

    c.vsources
        .push(VoltageSource::new("V1", n1, NodeId::GROUND, 0.0).with_ac(1.0, 0.0));
    c.resistors.push(Resistor::new("R1", n1, n2, 30.0));
    c.capacitors
        .push(Capacitor::new("C1", n2, NodeId::GROUND, 100e-6));
    c.ac = Some(AcSweep {
        mode: AcSweepMode::Decade,
        num_points: 100,
        fstart: 1.0,
        fstop: 100.0,
    });
    c.finalize();
    c
}

/// Single-pole magnitude and phase at the first sweep point (1 Hz).
#[test]
fn test_single_pole_low_frequency() {
    let c = single_pole_rc();
    let result = run_ac(&c).unwrap().unwrap();

    assert!((result.freqs[0] - 1.0).abs() < 1e-12);

    let mag = result.magnitude("2").unwrap();
    assert!(
        (mag[0] - 0.999822).abs() < 1e-4,
        "|V(2)| @1Hz = {}",
        mag[0]
    );

    let phase = result.phase_deg("2").unwrap();
    assert!(
        (phase[0] + 1.08).abs() < 0.01,
        "phase(V(2)) @1Hz = {}",
        phase[0]
    );
}

/// Transfer function matches 1/(1 + jwRC) across the whole sweep.
#[test]
fn test_single_pole_tracks_analytic_response() {
    let c = single_pole_rc();
    let result = run_ac(&c).unwrap().unwrap();

    let v2 = &result.node_voltages["2"];
    for (k, &f) in result.freqs.iter().enumerate() {
        let wrc = 2.0 * std::f64::consts::PI * f * 30.0 * 100e-6;
        let expected = Complex::new(1.0, 0.0) / Complex::new(1.0, wrc);
        assert!(
            (v2[k] - expected).norm() < 1e-9,
            "f = {}: {} vs {}",
            f,
            v2[k],
            expected
        );
    }

    // Series elements carry the same current.
    let i_r = &result.element_currents["R1"];
    let i_c = &result.element_currents["C1"];
    for k in 0..result.freqs.len() {
        assert!((i_r[k] - i_c[k]).norm() < 1e-12);
    }
}

/// Series RL driven by a 1V phasor: I = V / (R + jwL) through both
/// elements, with the source branch carrying the return current.
#[test]
fn test_series_rl_currents() {
    let r = 1e3;
    let l = 0.1;

    let mut c = Circuit::new();
    let n1 = c.nodes.intern("1");
    let n2 = c.nodes.intern("2");

    c.vsources
        .push(VoltageSource::new("V1", n1, NodeId::GROUND, 0.0).with_ac(1.0, 0.0));
    c.resistors.push(Resistor::new("R1", n1, n2, r));
    c.inductors
        .push(Inductor::new("L1", n2, NodeId::GROUND, l));
    c.ac = Some(AcSweep {
        mode: AcSweepMode::Linear,
        num_points: 3,
        fstart: 100.0,
        fstop: 200.0,
    });
    c.finalize();

    let result = run_ac(&c).unwrap().unwrap();
    assert_eq!(result.freqs.len(), 3);

    for (k, &f) in result.freqs.iter().enumerate() {
        let omega = 2.0 * std::f64::consts::PI * f;
        let expected = Complex::new(1.0, 0.0) / Complex::new(r, omega * l);

        let i_r = result.element_currents["R1"][k];
        let i_l = result.element_currents["L1"][k];
        let i_v = result.element_currents["V1"][k];

        assert!((i_r - expected).norm() < 1e-12, "f = {}", f);
        assert!((i_l - expected).norm() < 1e-12, "f = {}", f);
        // The branch current flows out of the positive terminal.
        assert!((i_v + expected).norm() < 1e-12, "f = {}", f);
    }
}

/// DC-only sources stamp a zero phasor, small-signal-shorting themselves.
#[test]
fn test_dc_only_source_is_shorted() {
    let mut c = Circuit::new();
    let n1 = c.nodes.intern("1");
    let n2 = c.nodes.intern("2");

    c.vsources
        .push(VoltageSource::new("V1", n1, NodeId::GROUND, 10.0));
    c.resistors.push(Resistor::new("R1", n1, n2, 1e3));
    c.resistors.push(Resistor::new("R2", n2, NodeId::GROUND, 1e3));
    c.ac = Some(AcSweep {
        mode: AcSweepMode::Linear,
        num_points: 2,
        fstart: 1.0,
        fstop: 10.0,
    });
    c.finalize();

    let result = run_ac(&c).unwrap().unwrap();
    for series in result.node_voltages.values() {
        for v in series {
            assert!(v.norm() < 1e-15);
        }
    }
}

/// Non-positive resistance is rejected under AC.
#[test]
fn test_nonpositive_resistance_rejected() {
    let mut c = Circuit::new();
    let n1 = c.nodes.intern("1");

    c.vsources
        .push(VoltageSource::new("V1", n1, NodeId::GROUND, 0.0).with_ac(1.0, 0.0));
    c.resistors
        .push(Resistor::new("R1", n1, NodeId::GROUND, -5.0));
    c.ac = Some(AcSweep {
        mode: AcSweepMode::Linear,
        num_points: 2,
        fstart: 1.0,
        fstop: 10.0,
    });
    c.finalize();

    let result = run_ac(&c);
    assert!(matches!(
        result,
        Err(ohmic_solver::Error::BadElementValue { .. })
    ));
}

/// No `.AC` request yields no result.
#[test]
fn test_no_ac_request() {
    let c = Circuit::new();
    assert!(run_ac(&c).unwrap().is_none());
}

/// Universal property: every series is as long as the frequency list.
#[test]
fn test_series_lengths_match_sweep() {
    let c = single_pole_rc();
    let result = run_ac(&c).unwrap().unwrap();

    let n = result.freqs.len();
    assert!(n >= 201);
    for series in result.node_voltages.values() {
        assert_eq!(series.len(), n);
    }
    for series in result.element_currents.values() {
        assert_eq!(series.len(), n);
    }
}
