use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use bench_harness::config::{
    DEFAULT_BIND_HOST, DEFAULT_CONFIG_FILE, DEFAULT_GRACE_SECS, DEFAULT_SERVER_PORT, DEFAULT_WORKERS,
    load_optional, require,
};

use crate::error::ServerError;

#[derive(Parser)]
#[command(name = "metrics-server", about = "Приём метрик и замер десериализации")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Запустить gRPC сервер
    Serve(ServeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Путь к bench.toml
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "BENCH_CONFIG")]
    pub config: PathBuf,

    /// Каталог результатов (артефакты + deserialize_times.json)
    #[arg(long, env = "RESULTS_PATH")]
    pub results_path: Option<PathBuf>,

    /// Адрес для прослушивания
    #[arg(long, env = "SERVER_BIND")]
    pub bind_host: Option<String>,

    /// Порт gRPC
    #[arg(long, env = "SERVER_PORT")]
    pub server_port: Option<u16>,

    /// Максимум одновременно обрабатываемых запросов
    #[arg(long)]
    pub workers: Option<usize>,

    /// Сколько секунд ждать текущие запросы при остановке
    #[arg(long)]
    pub grace_secs: Option<u64>,

    /// Каталог для server.log
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Итоговая конфигурация после мержа: bench.toml < env/CLI
#[derive(Debug)]
pub struct Effective {
    pub results_path: PathBuf,
    pub bind_host: String,
    pub server_port: u16,
    pub workers: usize,
    pub grace: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Effective {
    pub fn new(args: &ServeArgs) -> Result<Self, ServerError> {
        let cfg = load_optional(&args.config)?;

        Ok(Self {
            results_path: require(args.results_path.clone().or(cfg.results_path), "results_path", "RESULTS_PATH")?,
            bind_host: args
                .bind_host
                .clone()
                .or(cfg.bind_host)
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            server_port: args.server_port.or(cfg.server_port).unwrap_or(DEFAULT_SERVER_PORT),
            workers: args.workers.or(cfg.workers).unwrap_or(DEFAULT_WORKERS),
            grace: Duration::from_secs(args.grace_secs.or(cfg.grace_secs).unwrap_or(DEFAULT_GRACE_SECS)),
            log_dir: args.log_dir.clone().or(cfg.log_dir),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.server_port)
    }
}
