use kanal::AsyncReceiver;

use fanyi_types::{AppEvent, HistoryRecord};

/// Printer loop: renders app events on the terminal. This is the whole
/// presentation layer; failed deliveries end here and nowhere else.
pub async fn ui_loop(output_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    loop {
        let event = output_rx.recv().await?;

        match event {
            AppEvent::ShowTranslation { text, engine } => {
                println!("[{engine}] {text}");
            }
            AppEvent::ShowHistory(records) => print_history(&records),
            AppEvent::ShowError { engine, message } => match engine {
                Some(engine) => eprintln!("error ({engine}): {message}"),
                None => eprintln!("error: {message}"),
            },
            AppEvent::HistoryCleared => println!("history cleared"),
            _ => {}
        }
    }
}

fn print_history(records: &[HistoryRecord]) {
    if records.is_empty() {
        println!("(no history)");
        return;
    }

    for (index, record) in records.iter().enumerate() {
        let translated = record.translated.replace('\n', " | ");
        println!(
            "#{index} [{}] {} -> {}  ({} -> {}, {})",
            record.engine,
            record.original,
            translated,
            record.source_language,
            record.target_language,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        );
    }
}
