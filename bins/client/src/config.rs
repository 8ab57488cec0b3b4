use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use bench_harness::config::{
    DEFAULT_CONFIG_FILE, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_COUNT, DEFAULT_SERVER_PORT, load_optional,
    require,
};

use crate::error::ClientError;

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug)]
pub struct ClientArgs {
    /// Путь к bench.toml
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "BENCH_CONFIG")]
    pub config: PathBuf,

    /// Каталог результатов (serialize_times.json)
    #[arg(long, env = "RESULTS_PATH")]
    pub results_path: Option<PathBuf>,

    /// Хост сервера
    #[arg(long, env = "SERVER_HOST")]
    pub server_host: Option<String>,

    /// Порт сервера
    #[arg(long, env = "SERVER_PORT")]
    pub server_port: Option<u16>,

    /// Количество записей в batch
    #[arg(long, env = "METRICS_COUNT")]
    pub count: Option<usize>,

    /// Seed генератора (без указания — из энтропии ОС)
    #[arg(long, env = "METRICS_SEED")]
    pub seed: Option<u64>,

    /// Таймаут подключения к серверу, секунды
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,

    /// Каталог для client.log
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Итоговая конфигурация после мержа: bench.toml < env/CLI
#[derive(Debug)]
pub struct Effective {
    pub results_path: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    pub count: usize,
    pub seed: Option<u64>,
    pub connect_timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Effective {
    pub fn new(args: &ClientArgs) -> Result<Self, ClientError> {
        let cfg = load_optional(&args.config)?;

        Ok(Self {
            results_path: require(args.results_path.clone().or(cfg.results_path), "results_path", "RESULTS_PATH")?,
            server_host: require(args.server_host.clone().or(cfg.server_host), "server_host", "SERVER_HOST")?,
            server_port: args.server_port.or(cfg.server_port).unwrap_or(DEFAULT_SERVER_PORT),
            count: args.count.or(cfg.count).unwrap_or(DEFAULT_COUNT),
            seed: args.seed.or(cfg.seed),
            connect_timeout: Duration::from_secs(
                args.connect_timeout_secs
                    .or(cfg.connect_timeout_secs)
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            log_dir: args.log_dir.clone().or(cfg.log_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: PathBuf) -> ClientArgs {
        ClientArgs {
            config,
            results_path: None,
            server_host: None,
            server_port: None,
            count: None,
            seed: None,
            connect_timeout_secs: None,
            log_dir: None,
        }
    }

    #[test]
    fn file_values_fill_gaps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "results_path = \"out\"\nserver_host = \"bench-server\"\ncount = 25").unwrap();

        let eff = Effective::new(&args(file.path().to_path_buf())).unwrap();
        assert_eq!(eff.results_path, PathBuf::from("out"));
        assert_eq!(eff.server_host, "bench-server");
        assert_eq!(eff.server_port, 50051);
        assert_eq!(eff.count, 25);
        assert_eq!(eff.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "results_path = \"out\"\nserver_host = \"a\"\nserver_port = 1").unwrap();

        let mut a = args(file.path().to_path_buf());
        a.server_host = Some("b".into());
        a.server_port = Some(2);
        let eff = Effective::new(&a).unwrap();
        assert_eq!(eff.server_host, "b");
        assert_eq!(eff.server_port, 2);
    }

    #[test]
    fn host_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path().join("absent.toml"));
        a.results_path = Some("out".into());
        let err = Effective::new(&a).unwrap_err().to_string();
        assert!(err.contains("SERVER_HOST"), "{err}");
    }
}
