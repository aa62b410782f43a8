use std::sync::Arc;

use kanal::AsyncSender;

use fanyi_core::{Preprocessor, SelectionPreprocessor, ServiceError};
use fanyi_types::{AppEvent, TranslationRequest};

use crate::state::AppState;

pub async fn handle_translate(
    state: Arc<AppState>,
    output_tx: &AsyncSender<AppEvent>,
    text: String,
) -> anyhow::Result<()> {
    let settings = state.settings.get().await?;

    let processed = SelectionPreprocessor.process(&text);
    let Ok(request) = TranslationRequest::new(&processed, settings.target_language) else {
        // Nothing left after normalization.
        return Ok(());
    };

    match state.service.run(&request).await {
        Ok(outcome) => {
            output_tx
                .send(AppEvent::ShowTranslation {
                    text: outcome.text,
                    engine: outcome.engine,
                })
                .await?;
        }
        Err(err) => {
            tracing::error!("translation failed: {err}");
            let engine = match &err {
                ServiceError::Translate { engine, .. } => Some(*engine),
                ServiceError::Store(_) => None,
            };
            output_tx
                .send(AppEvent::ShowError {
                    engine,
                    message: err.to_string(),
                })
                .await?;
        }
    }

    Ok(())
}
