use kanal::AsyncSender;

use fanyi_types::AppEvent;

use crate::state::AppState;

pub async fn handle_history(
    state: &AppState,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let records = state.history.list().await?;
    output_tx.send(AppEvent::ShowHistory(records)).await?;
    Ok(())
}

/// Delete the record at the listed position (newest first).
pub async fn handle_delete(
    state: &AppState,
    output_tx: &AsyncSender<AppEvent>,
    index: usize,
) -> anyhow::Result<()> {
    let records = state.history.list().await?;

    let Some(target) = records.get(index).cloned() else {
        output_tx
            .send(AppEvent::ShowError {
                engine: None,
                message: format!("no history entry #{index}"),
            })
            .await?;
        return Ok(());
    };

    state
        .history
        .delete_where(|record| *record == target)
        .await?;

    handle_history(state, output_tx).await
}

pub async fn handle_clear(
    state: &AppState,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.history.clear().await?;
    output_tx.send(AppEvent::HistoryCleared).await?;
    Ok(())
}
