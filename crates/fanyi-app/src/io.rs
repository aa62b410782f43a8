use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use fanyi_types::AppEvent;

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Translate(String),
    History,
    Delete(usize),
    Clear,
    Quit,
    Nothing,
}

/// Empty selections never reach the core; command lines start with ':'.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    match line {
        ":quit" | ":q" => Command::Quit,
        ":history" => Command::History,
        ":clear" => Command::Clear,
        _ => {
            if let Some(rest) = line.strip_prefix(":delete") {
                match rest.trim().parse() {
                    Ok(index) => Command::Delete(index),
                    Err(_) => Command::Nothing,
                }
            } else {
                Command::Translate(line.to_string())
            }
        }
    }
}

/// Stdin watcher: turns typed lines into app events until EOF or shutdown.
pub async fn input_loop(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    cancel.cancel();
                    break;
                };

                match parse_line(&line) {
                    Command::Nothing => {}
                    Command::Quit => {
                        cancel.cancel();
                        break;
                    }
                    Command::Translate(text) => {
                        event_tx.send(AppEvent::TextInput(text)).await?;
                    }
                    Command::History => {
                        event_tx.send(AppEvent::HistoryRequested).await?;
                    }
                    Command::Delete(index) => {
                        event_tx.send(AppEvent::DeleteRequested(index)).await?;
                    }
                    Command::Clear => {
                        event_tx.send(AppEvent::ClearRequested).await?;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_do_nothing() {
        assert_eq!(parse_line(""), Command::Nothing);
        assert_eq!(parse_line("   "), Command::Nothing);
    }

    #[test]
    fn test_commands_parse() {
        assert_eq!(parse_line(":quit"), Command::Quit);
        assert_eq!(parse_line(":history"), Command::History);
        assert_eq!(parse_line(":clear"), Command::Clear);
        assert_eq!(parse_line(":delete 2"), Command::Delete(2));
        assert_eq!(parse_line(":delete x"), Command::Nothing);
    }

    #[test]
    fn test_everything_else_translates() {
        assert_eq!(
            parse_line("  hello world "),
            Command::Translate("hello world".to_string())
        );
    }
}
