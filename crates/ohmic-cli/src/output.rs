//! CSV-style result formatting.
//!
//! The engine crates perform no I/O; these writers turn result structs
//! into CSV tables on any sink. AC output pairs magnitude in dB with
//! phase in degrees per node, which imports cleanly into plotting tools.

use std::io::{self, Write};

use ohmic::{AcResult, TranResult};

/// Write a transient result as `time,V(...)...,I(...)...` rows.
pub fn write_tran_csv(result: &TranResult, out: &mut impl Write) -> io::Result<()> {
    write!(out, "time")?;
    for name in result.node_voltages.keys() {
        write!(out, ",V({})", name)?;
    }
    for name in result.element_currents.keys() {
        write!(out, ",I({})", name)?;
    }
    writeln!(out)?;

    for (i, t) in result.times.iter().enumerate() {
        write!(out, "{:.6e}", t)?;
        for series in result.node_voltages.values() {
            write!(out, ",{:.6e}", series[i])?;
        }
        for series in result.element_currents.values() {
            write!(out, ",{:.6e}", series[i])?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write an AC result as `frequency,|V(...)|_dB,phase(...)...` rows.
pub fn write_ac_csv(result: &AcResult, out: &mut impl Write) -> io::Result<()> {
    write!(out, "frequency")?;
    for name in result.node_voltages.keys() {
        write!(out, ",|V({})|_dB,phase({})", name, name)?;
    }
    writeln!(out)?;

    for (i, f) in result.freqs.iter().enumerate() {
        write!(out, "{:.6e}", f)?;
        for series in result.node_voltages.values() {
            let v = series[i];
            let mag_db = 20.0 * v.norm().log10();
            let phase_deg = v.arg().to_degrees();
            write!(out, ",{:.6e},{:.6e}", mag_db, phase_deg)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
