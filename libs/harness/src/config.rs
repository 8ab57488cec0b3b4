//! Общий TOML-файл конфигурации. Каждый бинарник мержит его со своими
//! CLI/env аргументами: config file < env/CLI.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BenchError;

pub const DEFAULT_CONFIG_FILE: &str = "bench.toml";
pub const DEFAULT_SERVER_PORT: u16 = 50051;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_COUNT: usize = 1000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_GRACE_SECS: u64 = 5;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub results_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub bind_host: Option<String>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub workers: Option<usize>,
    pub grace_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<FileConfig, BenchError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| BenchError::Config(format!("cannot read config {}: {e}", path.display())))?;
    toml::from_str(&content).map_err(|e| BenchError::Config(format!("bad config {}: {e}", path.display())))
}

/// Как [`load_config`], но отсутствующий файл даёт пустую конфигурацию.
/// Существующий, но нечитаемый файл — ошибка.
pub fn load_optional(path: &Path) -> Result<FileConfig, BenchError> {
    match load_config(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            if path.exists() {
                return Err(e);
            }
            Ok(FileConfig::default())
        }
    }
}

/// Обязательное значение: ошибка называет и флаг, и переменную окружения.
pub fn require<T>(value: Option<T>, key: &str, env: &str) -> Result<T, BenchError> {
    value.ok_or_else(|| {
        BenchError::Config(format!("{key} is not set (use --{}, {env} or `{key}` in config)", key.replace('_', "-")))
    })
}
