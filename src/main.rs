use std::net::SocketAddr;
use std::path::Path;

use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::{event_log::EventLog, file_repo::FileTodoRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let todos_file = std::env::var("TODOS_FILE").unwrap_or_else(|_| "todos.json".to_string());
    let logs_file = std::env::var("LOGS_FILE").unwrap_or_else(|_| "logs.txt".to_string());
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    // A missing collection file just means an empty collection, but its
    // directory has to exist before the first write.
    prepare_parent_dir(&todos_file)?;
    prepare_parent_dir(&logs_file)?;

    let repo = FileTodoRepository::new(&todos_file);
    let service = TodoServiceImpl::new(repo);
    let events = EventLog::spawn(&logs_file);
    let todos_router = todos::router(todos::AppState { service, events });
    let router = routing::app(todos_router);

    tracing::info!(%addr, %todos_file, %logs_file, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}

fn prepare_parent_dir(path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
