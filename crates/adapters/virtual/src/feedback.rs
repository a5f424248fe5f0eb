//! Audible click on device changes.

use std::io::Write;

use homesim_app::ports::Feedback;

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Feedback for TerminalBell {
    fn click(&self) {
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            tracing::debug!(%err, "terminal bell unavailable");
        }
    }
}
