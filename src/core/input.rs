//! Click event input

use log::{debug, warn};
use std::io::{self, BufRead};
use std::thread;
use tokio::sync::mpsc;

/// Raw click lines, handed from one bar to the next on reload
pub type ClickLines = mpsc::Receiver<String>;

/// Lines buffered between stdin and the click loop
pub const CLICK_CHANNEL_CAPACITY: usize = 32;

/// Forward stdin lines from a dedicated thread
///
/// Only this thread ever reads stdin, so a pending read never holds up a
/// bar that is stopping. The channel closes at end of input.
pub fn spawn_stdin_reader() -> io::Result<ClickLines> {
    let (tx, rx) = mpsc::channel(CLICK_CHANNEL_CAPACITY);
    thread::Builder::new()
        .name("click-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            forward_lines(stdin.lock(), &tx);
            debug!("Click reader exiting");
        })?;
    Ok(rx)
}

/// Send every line of `reader` until end of input or a read error
///
/// Invalid UTF-8 is replaced rather than ending the stream; the click loop
/// drops lines it cannot decode. Blocks the calling thread.
pub(crate) fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(&['\n', '\r'][..]).to_string();
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Failed to read click events: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &[u8]) -> Vec<String> {
        let (tx, mut rx) = mpsc::channel(CLICK_CHANNEL_CAPACITY);
        forward_lines(Cursor::new(input.to_vec()), &tx);
        drop(tx);
        let mut lines = Vec::new();
        while let Some(line) = rx.blocking_recv() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_invalid_utf8_does_not_end_stream() {
        let lines = collect(b"[\n\xff\xfe\n,{\"name\":\"a\",\"button\":1}\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[");
        assert_eq!(lines[2], ",{\"name\":\"a\",\"button\":1}");
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let lines = collect(b"one\r\ntwo");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        forward_lines(Cursor::new(b"a\nb\nc\n".to_vec()), &tx);
    }
}
