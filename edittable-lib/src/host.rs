//! The page environment the editor talks to

/// User-facing side effects the editor needs from its host page.
///
/// All calls happen on the UI thread; `confirm` blocks until the user
/// answers.
pub trait UiHost: Send + Sync {
    /// Shows a blocking message.
    fn alert(&self, message: &str);

    /// Asks a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Switches the busy cursor on or off around a round trip.
    fn set_busy(&self, busy: bool);
}

/// A host that logs alerts and accepts every confirmation.
///
/// Useful for headless embedding, where nobody is there to answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHost;

impl UiHost for LogHost {
    fn alert(&self, message: &str) {
        log::warn!("alert: {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        log::info!("auto-confirming: {message}");
        true
    }

    fn set_busy(&self, busy: bool) {
        log::trace!("busy cursor {}", if busy { "on" } else { "off" });
    }
}
