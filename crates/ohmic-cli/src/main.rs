//! Ohmic command-line interface.

mod output;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ohmic::core::units::format_value;

use output::{write_ac_csv, write_tran_csv};

#[derive(Parser)]
#[command(name = "ohmic")]
#[command(about = "A compact SPICE-class circuit simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Input netlist file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let content = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read netlist: {}", cli.input.display()))?;

    let mut circuit = ohmic::parse(&content).context("parse error")?;

    if cli.verbose {
        println!("* Circuit: {}", circuit.title.as_deref().unwrap_or("(untitled)"));
        println!("* Nodes: {}", circuit.num_unknown_nodes());
        println!(
            "* Elements: {} R, {} C, {} L, {} V, {} S, {} D",
            circuit.resistors.len(),
            circuit.capacitors.len(),
            circuit.inductors.len(),
            circuit.vsources.len(),
            circuit.switches.len(),
            circuit.diodes.len(),
        );
        println!("* MNA unknowns: {}", circuit.mna_size());
        println!();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut ran_any = false;

    if let Some(ac) = ohmic::run_ac(&circuit).context("AC analysis failed")? {
        if cli.verbose {
            println!(
                "* AC analysis: {} frequency points, {}Hz to {}Hz",
                ac.freqs.len(),
                format_value(*ac.freqs.first().unwrap_or(&0.0)),
                format_value(*ac.freqs.last().unwrap_or(&0.0)),
            );
        }
        write_ac_csv(&ac, &mut out).context("failed to write AC output")?;
        ran_any = true;
    }

    if let Some(tran) = ohmic::run_transient(&mut circuit).context("transient analysis failed")? {
        if cli.verbose {
            println!(
                "* Transient analysis: {} time points, stop at {}s",
                tran.times.len(),
                format_value(*tran.times.last().unwrap_or(&0.0)),
            );
        }
        write_tran_csv(&tran, &mut out).context("failed to write transient output")?;
        ran_any = true;
    }

    if !ran_any {
        eprintln!("netlist requests no analysis (.ac or .tran); nothing to do");
    }

    Ok(())
}
