use std::path::PathBuf;

use clap::Parser;
use sprinkler_evap::validation::{self, Assessment, NominalRanges};
use sprinkler_evap::{Config, NomographInputs};

/// Sprinkler evaporation loss from the Frost & Schwalen nomograph
#[derive(Parser, Debug)]
#[command(name = "sprinkler-evap", version)]
struct Cli {
    /// Vapor-pressure deficit [psi]
    #[arg(long, default_value_t = 0.6)]
    vpd: f64,

    /// Nozzle diameter [64ths of an inch]
    #[arg(long, default_value_t = 12.0)]
    nozzle: f64,

    /// Nozzle pressure [psi]
    #[arg(long, default_value_t = 40.0)]
    pressure: f64,

    /// Wind velocity [mph]
    #[arg(long, default_value_t = 5.0)]
    wind: f64,

    /// TOML file with nominal ranges and scenarios to run instead of the flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the construction points for each calculation
    #[arg(long)]
    trace: bool,

    /// Print the nominal ranges and exit
    #[arg(long)]
    ranges: bool,
}

fn report(
    name: &str,
    inputs: &NomographInputs,
    ranges: &NominalRanges,
    trace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{}: VPD={} psi, Nozzle={}/64 in, Pressure={} psi, Wind={} mph",
        name, inputs.vpd, inputs.nozzle, inputs.pressure, inputs.wind
    );

    match validation::assess(ranges, inputs)? {
        Assessment::InRange { loss_percent } => {
            println!("  Evaporation Loss: {:.2}%", loss_percent);
        }
        Assessment::OutputOutOfRange { loss_percent } => {
            println!(
                "  Evaporation Loss: {:.2}% (outside expected {} to {}%)",
                loss_percent, ranges.loss.min, ranges.loss.max
            );
        }
        Assessment::InputOutOfRange { violations } => {
            for v in violations {
                println!("  Error: {}", v);
            }
            return Ok(());
        }
    }

    if trace {
        let c = inputs.construct()?;
        println!(
            "  scales: vpd {:.4}, nozzle {:.4}, pressure {:.4}, wind {:.4}",
            c.vpd.y, c.nozzle.y, c.pressure.y, c.wind.y
        );
        println!(
            "  pivot A {:.4}, pivot B {:.4}, loss line {:.4}",
            c.pivot_a.y, c.pivot_b.y, c.loss.y
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if cli.ranges {
        println!("{}", config.ranges);
        return Ok(());
    }

    if config.scenarios.is_empty() {
        let inputs = NomographInputs::new(cli.vpd, cli.nozzle, cli.pressure, cli.wind);
        report("Input", &inputs, &config.ranges, cli.trace)?;
    } else {
        for scenario in &config.scenarios {
            report(&scenario.name, &scenario.inputs, &config.ranges, cli.trace)?;
        }
    }

    Ok(())
}
