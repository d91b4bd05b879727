//! Replay host: feeds newline-delimited JSON host events to the controller

pub mod state;

pub use state::AppState;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::host::HostEvent;

/// Counters for one replayed stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: u64,
    pub skipped: u64,
}

/// Read events line by line and apply them in order.
///
/// Blank lines are ignored and malformed lines are logged and skipped;
/// only I/O errors end the stream early.
pub async fn run_event_stream<R>(state: &mut AppState, reader: R) -> std::io::Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();
    let mut line_number = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => {
                debug!(line = line_number, event = ?event, "Host event");
                state.handle_event(event);
                stats.events += 1;
            }
            Err(e) => {
                warn!(line = line_number, error = %e, "Skipping malformed event");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
