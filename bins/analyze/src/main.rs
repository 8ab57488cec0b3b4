mod chart;
mod cmd;
mod config;
mod error;

use clap::Parser;
use config::{AnalyzeArgs, Effective};

#[derive(Parser)]
#[command(name = "metrics-analyze", about = "Графики размеров и времени сериализации по результатам прогона")]
struct Cli {
    #[command(flatten)]
    args: AnalyzeArgs,
}

fn main() {
    let cli = Cli::parse();

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = bench_harness::telemetry::init_tracing("analyze", eff.log_dir.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = cmd::report::run(&eff) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
