mod cmd;
mod config;
mod error;

use clap::Parser;
use config::{ClientArgs, Effective};

#[derive(Parser)]
#[command(name = "metrics-client", about = "Генерация метрик, замер сериализации и отправка на сервер")]
struct Cli {
    #[command(flatten)]
    args: ClientArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = bench_harness::telemetry::init_tracing("client", eff.log_dir.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = cmd::run::run(&eff).await {
        tracing::error!(kind = %e.kind(), error = %e, "client run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
