//! Outbound link click handling.
//!
//! A click on an external link is reported to analytics with the anonymized
//! href. When the browser is about to open a new tab or window we leave the
//! click alone. Otherwise the caller suppresses the default navigation and we
//! navigate ourselves once analytics acknowledges the event, so the report is
//! sent before the page unloads.

use std::cell::Cell;
use std::rc::Rc;

use crate::anonymize::Anonymizer;

/// Sink for outbound link events.
pub trait Analytics {
    /// Report a click on an outbound link. `on_complete` runs once the event
    /// has been handed off; it may never run (blocked script, network error).
    fn report_outbound_link(&self, label: &str, on_complete: Box<dyn FnOnce()>);
}

/// Moves the current browsing context to a new URL.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// `MouseEvent.button` value of the main (usually left) button
pub const PRIMARY_BUTTON: i16 = 0;

/// The parts of a click on an external anchor that matter for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundClickEvent {
    pub raw_href: String,
    /// The browser will open the link elsewhere (new tab or window)
    pub opens_new_context: bool,
}

impl OutboundClickEvent {
    pub fn new(raw_href: impl Into<String>, opens_new_context: bool) -> Self {
        Self {
            raw_href: raw_href.into(),
            opens_new_context,
        }
    }

    /// Build from an anchor's `target` attribute and a DOM click.
    ///
    /// Only primary-button clicks are intercepted; middle and right clicks
    /// give `None` and are left to the browser. Ctrl (and Cmd on macOS) clicks
    /// open a new tab regardless of `target`.
    pub fn from_click(
        href: impl Into<String>,
        target: Option<&str>,
        button: i16,
        ctrl_key: bool,
        meta_key: bool,
    ) -> Option<Self> {
        if button != PRIMARY_BUTTON {
            return None;
        }
        let opens_new_context = target == Some("_blank") || ctrl_key || meta_key;
        Some(Self::new(href, opens_new_context))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    /// Waiting for analytics to acknowledge the event
    Reporting,
    Navigated,
}

/// A same-tab navigation held back until analytics completes.
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    anonymized_href: String,
    state: Rc<Cell<NavigationState>>,
}

impl PendingNavigation {
    pub fn anonymized_href(&self) -> &str {
        &self.anonymized_href
    }

    pub fn state(&self) -> NavigationState {
        self.state.get()
    }

    pub fn is_navigated(&self) -> bool {
        self.state() == NavigationState::Navigated
    }
}

/// What the interceptor decided for one click.
#[derive(Debug, Clone)]
pub enum Interception {
    /// Browser handles navigation itself; analytics fired alongside.
    PassThrough { anonymized_href: String },
    /// Default navigation must be prevented; we navigate after analytics.
    Deferred(PendingNavigation),
}

impl Interception {
    /// Whether the caller must call `preventDefault()` on the click event.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Interception::Deferred(_))
    }

    pub fn anonymized_href(&self) -> &str {
        match self {
            Interception::PassThrough { anonymized_href } => anonymized_href,
            Interception::Deferred(pending) => pending.anonymized_href(),
        }
    }
}

pub struct OutboundLinkInterceptor<A, N, Z> {
    analytics: A,
    navigator: Rc<N>,
    anonymizer: Z,
}

impl<A, N, Z> OutboundLinkInterceptor<A, N, Z>
where
    A: Analytics,
    N: Navigator + 'static,
    Z: Anonymizer,
{
    pub fn new(analytics: A, navigator: N, anonymizer: Z) -> Self {
        Self {
            analytics,
            navigator: Rc::new(navigator),
            anonymizer,
        }
    }

    /// Report the click and decide who navigates.
    pub fn intercept(&self, event: &OutboundClickEvent) -> Interception {
        let anonymized_href = self.anonymizer.anonymize(&event.raw_href);

        if event.opens_new_context {
            let label = anonymized_href.clone();
            self.analytics.report_outbound_link(
                &anonymized_href,
                Box::new(move || log::debug!("Fired outbound link event {}", label)),
            );
            return Interception::PassThrough { anonymized_href };
        }

        let state = Rc::new(Cell::new(NavigationState::Reporting));
        let navigator = Rc::clone(&self.navigator);
        let target = anonymized_href.clone();
        let done = Rc::clone(&state);

        self.analytics.report_outbound_link(
            &anonymized_href,
            Box::new(move || {
                done.set(NavigationState::Navigated);
                navigator.navigate(&target);
            }),
        );

        Interception::Deferred(PendingNavigation { anonymized_href, state })
    }
}
