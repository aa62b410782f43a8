use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};

use fanyi_types::AppEvent;

use crate::state::AppState;

pub mod history;
pub mod translate;

use history::{handle_clear, handle_delete, handle_history};
use translate::handle_translate;

/// App's main loop. Each translation runs in its own task so requests
/// triggered in quick succession stay concurrent.
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        let event = input_rx.recv().await?;

        match event {
            AppEvent::TextInput(text) => {
                let state = state.clone();
                let output_tx = output_tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = handle_translate(state, &output_tx, text).await {
                        tracing::error!("translation task failed: {err}");
                    }
                });
            }
            AppEvent::HistoryRequested => handle_history(&state, &output_tx).await?,
            AppEvent::DeleteRequested(index) => {
                handle_delete(&state, &output_tx, index).await?
            }
            AppEvent::ClearRequested => handle_clear(&state, &output_tx).await?,
            _ => {}
        }
    }
}
