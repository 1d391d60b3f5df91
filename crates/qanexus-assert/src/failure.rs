use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// ANSI escape switching terminal text to red.
pub const HIGHLIGHT_START: &str = "\x1b[31m";
/// ANSI escape restoring the default terminal color.
pub const HIGHLIGHT_END: &str = "\x1b[0m";

static DECORATION: OnceLock<AtomicBool> = OnceLock::new();

fn decoration() -> &'static AtomicBool {
    DECORATION.get_or_init(|| {
        let disabled = std::env::var_os("NO_COLOR").is_some()
            || std::env::var_os("QANEXUS_NO_COLOR").is_some();
        AtomicBool::new(!disabled)
    })
}

/// Enables or disables the highlight markers used when failures are displayed.
pub fn set_decoration(enabled: bool) {
    decoration().store(enabled, Ordering::Relaxed);
}

/// Whether failures are currently displayed with highlight markers.
pub fn decoration_enabled() -> bool {
    decoration().load(Ordering::Relaxed)
}

/// Removes highlight markers from a rendered failure message.
pub fn strip_decoration(text: &str) -> String {
    text.replace(HIGHLIGHT_START, "").replace(HIGHLIGHT_END, "")
}

/// Raised when a verification predicate does not hold.
///
/// The stored message is plain text. `Display` wraps it in highlight markers
/// unless decoration has been disabled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.message))]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(target: "qanexus_assert", message = %message, "assertion failed");
        Self { message }
    }

    /// The undecorated message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message wrapped in highlight markers, regardless of the global switch.
    pub fn decorated(&self) -> String {
        format!("{HIGHLIGHT_START}{}{HIGHLIGHT_END}", self.message)
    }
}

fn render(message: &str) -> String {
    if decoration_enabled() {
        format!("{HIGHLIGHT_START}{message}{HIGHLIGHT_END}")
    } else {
        message.to_string()
    }
}

/// Result type returned by every assertion.
pub type AssertResult = Result<(), AssertionFailure>;

/// Passes when `holds`, otherwise fails with `"{message-or-default} {detail}"`.
pub(crate) fn ensure<D>(
    holds: bool,
    message: Option<&str>,
    default: &str,
    detail: D,
) -> AssertResult
where
    D: FnOnce() -> String,
{
    if holds {
        return Ok(());
    }
    Err(failure(message, default, detail()))
}

pub(crate) fn failure(message: Option<&str>, default: &str, detail: String) -> AssertionFailure {
    let head = message.unwrap_or(default);
    if detail.is_empty() {
        AssertionFailure::new(head)
    } else {
        AssertionFailure::new(format!("{head} {detail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_custom_message_with_detail() {
        let err = ensure(false, Some("custom"), "default", || "detail".to_string())
            .expect_err("should fail");
        assert_eq!(err.message(), "custom detail");
    }

    #[test]
    fn falls_back_to_default_message() {
        let err = ensure(false, None, "default", String::new).expect_err("should fail");
        assert_eq!(err.message(), "default");
        assert_eq!(err.decorated(), "\x1b[31mdefault\x1b[0m");
        assert_eq!(strip_decoration(&err.decorated()), "default");
    }

    #[test]
    fn passing_check_skips_detail() {
        let result = ensure(true, None, "default", || panic!("detail must stay lazy"));
        assert!(result.is_ok());
    }
}
