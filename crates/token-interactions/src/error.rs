use thiserror::Error;

/// Why a clipboard write did not happen.
///
/// None of these are fatal: the copy controller leaves its state untouched and
/// hands the error back so the caller can decide whether to show anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No clipboard API in this context (server render, insecure origin, old browser)
    #[error("clipboard is not available in this context")]
    Unavailable,

    /// The platform refused the write (permission denied, document not focused)
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

impl ClipboardError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}
