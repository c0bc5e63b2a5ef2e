use token_interactions::Navigator;

/// Navigates by assigning `window.location.href`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowLocation;

impl Navigator for WindowLocation {
    #[cfg(feature = "hydrate")]
    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            leptos::logging::warn!("No window to navigate to {}", url);
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            leptos::logging::warn!("Navigation to {} failed: {:?}", url, e);
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn navigate(&self, url: &str) {
        leptos::logging::warn!("Navigation to {} requested outside the browser", url);
    }
}
