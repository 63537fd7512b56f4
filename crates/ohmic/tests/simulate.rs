//! End-to-end tests: netlist text in, analysis results out.

use ohmic::simulate;

/// DC divider through the transient engine.
#[test]
fn test_divider_netlist() {
    let report = simulate(
        "Voltage Divider\n\
         V1 1 0 DC 10\n\
         R1 1 2 1k\n\
         R2 2 0 1k\n\
         .tran 1u 1u\n\
         .end\n",
    )
    .unwrap();

    let tran = report.tran.unwrap();
    let v2 = tran.voltage("2").unwrap();
    assert!((v2.last().unwrap() - 5.0).abs() < 1e-9);
}

/// Node-casing round trip: three casings collapse to one node, display
/// uses the first-seen casing, and a `.PRINT` probe in another casing
/// still selects it.
#[test]
fn test_node_casing_round_trip() {
    let report = simulate(
        "Casing\n\
         V1 nOdE1 0 DC 5\n\
         R1 NODE1 mid 1k\n\
         R2 node1 mid 1k\n\
         R3 mid 0 1k\n\
         .tran 1u 1u\n\
         .print TRAN V(NODE1)\n\
         .end\n",
    )
    .unwrap();

    let tran = report.tran.unwrap();

    // Probe filtering kept only the one node, keyed by first-seen casing.
    assert_eq!(tran.node_voltages.len(), 1);
    assert!(tran.node_voltages.contains_key("nOdE1"));
    assert!((tran.voltage("node1").unwrap().last().unwrap() - 5.0).abs() < 1e-9);
}

/// Single-pole AC response from netlist text (magnitude and phase at 1 Hz).
#[test]
fn test_single_pole_ac_netlist() {
    let report = simulate(
        "Single Pole\n\
         V1 1 0 AC 1\n\
         R1 1 2 30\n\
         C1 2 0 100u\n\
         .ac dec 100 1 100\n\
         .end\n",
    )
    .unwrap();

    let ac = report.ac.unwrap();
    assert!((ac.freqs[0] - 1.0).abs() < 1e-12);

    let mag = ac.magnitude("2").unwrap();
    assert!((mag[0] - 0.999822).abs() < 1e-4);

    let phase = ac.phase_deg("2").unwrap();
    assert!((phase[0] + 1.08).abs() < 0.01);

    // Every series spans the sweep.
    for series in ac.node_voltages.values() {
        assert_eq!(series.len(), ac.freqs.len());
    }
}

/// Switch hysteresis from netlist text, with Vt/Vh threshold syntax.
#[test]
fn test_switch_netlist() {
    let report = simulate(
        "Relay\n\
         V1 in 0 DC 5\n\
         VC ctrl 0 PWL(0 0 1m 5 3m 0 7m 5 9m 0)\n\
         R1 in out 1k\n\
         C1 out 0 1u\n\
         S1 out 0 ctrl 0 relay\n\
         .model relay VSWITCH(Ron=1 Roff=1e9 Vt=1.5 Vh=1)\n\
         .tran 10u 10m\n\
         .end\n",
    )
    .unwrap();

    let tran = report.tran.unwrap();
    let out = tran.voltage("out").unwrap();
    let at = |t: f64| out[(t / 1e-5).round() as usize];

    assert!(at(0.5e-3) < 0.1);
    assert!(at(3.5e-3) > 2.0);
    assert!(at(8.5e-3) < 0.1);
}

/// Half-wave diode clamp from netlist text.
#[test]
fn test_diode_netlist() {
    let report = simulate(
        "Clamp\n\
         V1 a 0 DC 1\n\
         D1 a k dmod\n\
         R1 k 0 1k\n\
         .model dmod D(Is=1e-14 N=1)\n\
         .tran 10u 1m\n\
         .end\n",
    )
    .unwrap();

    let tran = report.tran.unwrap();
    let va = *tran.voltage("a").unwrap().last().unwrap();
    let vk = *tran.voltage("k").unwrap().last().unwrap();

    // Forward drop lands in the usual silicon band.
    let vd = va - vk;
    assert!(vd > 0.55 && vd < 0.7, "diode drop = {}", vd);
}

/// AC and TRAN requested together share one parsed circuit.
#[test]
fn test_combined_analyses() {
    let report = simulate(
        "Both\n\
         V1 1 0 DC 5 AC 1\n\
         R1 1 2 1k\n\
         C1 2 0 1u\n\
         .ac lin 5 100 500\n\
         .tran 10u 1m\n\
         .end\n",
    )
    .unwrap();

    let ac = report.ac.unwrap();
    assert_eq!(ac.freqs.len(), 5);

    let tran = report.tran.unwrap();
    // RC settles to the DC rail after 1ms = tau.
    let v2 = *tran.voltage("2").unwrap().last().unwrap();
    assert!(v2 > 3.0 && v2 < 5.0, "V(2) = {}", v2);
}
