use std::future::Future;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use bench_harness::ArtifactStore;
use bench_harness::telemetry::init_tracing;
use metrics_rpc::MetricsService;

use super::handler::StoreHandler;
use crate::config::{Effective, ServeArgs};
use crate::error::ServerError;

pub fn run(args: ServeArgs) -> Result<(), ServerError> {
    let eff = Effective::new(&args)?;
    init_tracing("server", eff.log_dir.as_deref())?;
    tracing::info!(config = %args.config.display(), "metrics-server starting");

    run_bounded(eff.grace, serve(&eff))?
}

/// Выполнить `future` на собственном runtime и остановить его не дольше
/// чем за `grace`: blocking-задачи handler'ов, не успевшие завершиться,
/// runtime больше не ждёт.
fn run_bounded<F: Future>(grace: Duration, future: F) -> Result<F::Output, ServerError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(grace);
    Ok(output)
}

async fn serve(eff: &Effective) -> Result<(), ServerError> {
    let store = ArtifactStore::open(&eff.results_path)?;
    tracing::info!(results = %store.root().display(), workers = eff.workers, "artifact store ready");

    let addr = eff.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();
    let service = MetricsService::new(StoreHandler::new(store), eff.workers);
    let mut server = tokio::spawn(metrics_rpc::serve(listener, service, token.clone()));

    tracing::info!(addr = %addr, "server ready");

    // --- Ожидание Ctrl+C / SIGTERM ---
    tokio::select! {
        joined = &mut server => {
            // serve returned on its own: transport failure
            joined??;
            return Ok(());
        }
        signal = shutdown_signal() => signal?,
    }
    tracing::info!("shutting down...");

    // Stop accepting; in-flight requests get the grace period
    token.cancel();

    match tokio::time::timeout(eff.grace, &mut server).await {
        Ok(joined) => joined??,
        Err(_) => {
            tracing::warn!(grace_s = eff.grace.as_secs(), "grace period elapsed, aborting in-flight requests");
            server.abort();
        }
    }

    tracing::info!("shutdown complete");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<(), ServerError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<(), ServerError> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn stuck_blocking_work_does_not_outlive_grace() {
        let started = Instant::now();
        let value = run_bounded(Duration::from_millis(100), async {
            tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(30)));
            7
        })
        .unwrap();

        assert_eq!(value, 7);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
