use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::BenchError;

/// Инициализировать tracing: stderr + опционально `{log_dir}/{component}.log`.
///
/// Уровень берётся из `RUST_LOG`, по умолчанию `info`.
pub fn init_tracing(component: &str, log_dir: Option<&Path>) -> Result<(), BenchError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| BenchError::artifact(dir, e))?;
            let path = dir.join(format!("{component}.log"));
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| BenchError::artifact(&path, e))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| BenchError::Config(format!("tracing init: {e}")))
}
