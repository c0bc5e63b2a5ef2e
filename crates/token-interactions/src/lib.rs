//! Interaction logic behind the token page widgets.
//!
//! Two independent pieces live here:
//! - [`ClipboardCopyController`]: copies text and keeps a short-lived "copied" flag
//! - [`OutboundLinkInterceptor`]: reports outbound clicks to analytics before navigating
//!
//! Every side effect (clipboard, timers, analytics, navigation) goes through a
//! trait so the browser bindings live in the web crate and tests use fakes.

pub mod anonymize;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod outbound;
pub mod scheduler;

pub use anonymize::{Anonymizer, LinkAnonymizer};
pub use clipboard::{Clipboard, ClipboardCopyController};
pub use config::InteractionConfig;
pub use error::ClipboardError;
pub use outbound::{
    Analytics, Interception, NavigationState, Navigator, OutboundClickEvent, OutboundLinkInterceptor,
    PendingNavigation, PRIMARY_BUTTON,
};
pub use scheduler::{ManualScheduler, Scheduler};
