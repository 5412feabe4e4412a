mod input;
mod logging;
mod report;

use clap::{Parser, Subcommand};
use powerup_core::{Param, SweepSpec, calculate_with, list_designs, sweep_with};
use tracing::info;

use input::CalcArgs;
use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "powerup")]
#[command(about = "Power, MDES and sample-size calculations for multilevel designs")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the supported designs
    Designs,

    /// Run one calculation
    Calc(CalcArgs),

    /// Evaluate over a range of one parameter
    Sweep {
        #[command(flatten)]
        calc: CalcArgs,

        /// Parameter to vary
        #[arg(long)]
        param: Param,

        #[arg(long)]
        from: f64,

        #[arg(long)]
        to: f64,

        /// Number of points, both ends included
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level);

    match args.command {
        Command::Designs => {
            print!("{}", report::format_designs(list_designs()));
        }
        Command::Calc(calc) => {
            let request = calc.resolve()?;
            info!(design = %request.design, mode = %request.mode, "running calculation");
            let result = calculate_with(
                &request.design,
                request.mode,
                &request.params,
                &request.solver,
            )?;
            print!("{}", report::format_result(&result));
        }
        Command::Sweep {
            calc,
            param,
            from,
            to,
            steps,
        } => {
            let request = calc.resolve()?;
            let spec = SweepSpec::new(param, from, to, steps);
            info!(design = %request.design, mode = %request.mode, sweep = %spec.label(), "running sweep");
            let result = sweep_with(
                &request.design,
                request.mode,
                &request.params,
                &spec,
                &request.solver,
            )?;
            print!("{}", report::format_sweep(&result));
        }
    }

    Ok(())
}
