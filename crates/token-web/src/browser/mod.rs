//! Browser-backed collaborators for the interaction library.
//!
//! Each type compiles in both builds. With `hydrate` they talk to the real
//! browser APIs; in the server build the handlers that would call them never
//! run, so they degrade to no-ops (clipboard reports itself unavailable).

mod analytics;
mod clipboard;
mod location;
mod timer;

pub use analytics::GtagAnalytics;
pub use clipboard::NavigatorClipboard;
pub use location::WindowLocation;
pub use timer::TimeoutScheduler;
