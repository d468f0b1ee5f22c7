//! Blog record RPC server.
//!
//! Wires the document store, the blog service and the HTTP/JSON transport,
//! and owns the process lifecycle: one store handle opened at startup,
//! graceful drain on shutdown, store closed last.

pub mod config;
pub mod error;
pub mod rpc;

pub use config::{CliArgs, ServerConfig};
pub use error::{ApiError, ServerError};
pub use rpc::{router, AppState};

use blog_core::{open_store, BlogService, DocumentStore, SqliteBlogRepository};
use log::{info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::task::TaskTracker;

/// Serves blog RPCs on `listener` until `shutdown` resolves.
///
/// In-flight calls are drained before this returns, including blocking
/// store work whose client already disconnected.
pub async fn serve(
    listener: TcpListener,
    store: Arc<DocumentStore>,
    collection: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let repo = SqliteBlogRepository::with_collection(store, collection);
    let tasks = TaskTracker::new();
    let app = router(AppState::with_tracker(
        Arc::new(BlogService::new(repo)),
        tasks.clone(),
    ));

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    tasks.close();
    if !tasks.is_empty() {
        info!(
            "event=server_stop module=server status=waiting blocking_tasks={}",
            tasks.len()
        );
    }
    tasks.wait().await;
    served?;
    Ok(())
}

/// Runs the server described by `config` until Ctrl-C or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    run_with_shutdown(config, shutdown_signal()).await
}

/// Runs the server described by `config` until `shutdown` resolves.
///
/// Once the store is open it is closed on every path, including a failed bind.
pub async fn run_with_shutdown(
    config: ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let store = Arc::new(open_store(&config.db_path, &config.store)?);
    serve_store(&config, store, shutdown).await
}

async fn serve_store(
    config: &ServerConfig,
    store: Arc<DocumentStore>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let served = bind_and_serve(config, Arc::clone(&store), shutdown).await;
    let closed = close_store(store);
    served.and(closed)
}

async fn bind_and_serve(
    config: &ServerConfig,
    store: Arc<DocumentStore>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    info!(
        "event=server_start module=server status=start addr={} store={} collection={}",
        config.addr,
        store.location(),
        config.collection
    );

    let listener = match TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            warn!(
                "event=server_start module=server status=error addr={} error={err}",
                config.addr
            );
            return Err(err.into());
        }
    };
    info!(
        "event=server_start module=server status=ok addr={}",
        listener.local_addr()?
    );

    let served = serve(listener, store, &config.collection, shutdown).await;
    info!("event=server_stop module=server status=drained");
    served
}

fn close_store(store: Arc<DocumentStore>) -> Result<(), ServerError> {
    let store = Arc::try_unwrap(store).map_err(|_| {
        warn!("event=store_close module=server status=error reason=handle_still_shared");
        ServerError::StoreInUse
    })?;
    match store.close() {
        Ok(()) => {
            info!("event=store_close module=server status=ok");
            Ok(())
        }
        Err(err) => {
            warn!("event=store_close module=server status=error error={err}");
            Err(err.into())
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("event=signal_install module=server status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("event=shutdown module=server signal=ctrl_c"),
        _ = terminate => info!("event=shutdown module=server signal=sigterm"),
    }
}
