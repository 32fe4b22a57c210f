// Line-based terminal keys. Each line's first character is the key, so the
// session can be driven from a terminal or a script piping answers in.

use crate::models::input::KeyCommand;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

const KEY_CHANNEL_CAPACITY: usize = 16;

/// Forward key commands read from `reader` until it ends or the receiver is dropped
pub fn spawn_key_reader<R>(reader: R) -> mpsc::Receiver<KeyCommand>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(KEY_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    debug!(error = %e, "key input closed");
                    break;
                }
            };

            let Some(command) = line.trim().chars().next().and_then(KeyCommand::from_key) else {
                continue;
            };

            if tx.send(command).await.is_err() {
                break;
            }
        }
    });

    rx
}

pub fn spawn_stdin_keys() -> mpsc::Receiver<KeyCommand> {
    spawn_key_reader(BufReader::new(tokio::io::stdin()))
}
