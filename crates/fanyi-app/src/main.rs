use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use fanyi_config::Config;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;

use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "fanyi=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new();
    let state = Arc::new(AppState::new(&config)?);

    if atty::is(atty::Stream::Stdin) {
        println!("fanyi: type text to translate, :history / :clear / :quit");
    }

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task finished, shutting down"),
                Some(Ok(Err(e))) => tracing::error!("task exited: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
            controller.shutdown();
        }
    }

    tasks.shutdown().await;
    Ok(())
}
