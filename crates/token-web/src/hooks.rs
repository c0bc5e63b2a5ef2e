//! Reactive wrappers that hand the interaction library to components.
//!
//! Controllers hold `Rc` state and browser handles, so they live in local
//! (non-`Send`) storage owned by the component that created them. Disposal of
//! that owner drops the controller, which cancels a pending copy expiry.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use token_interactions::{ClipboardCopyController, LinkAnonymizer, OutboundClickEvent, OutboundLinkInterceptor};

use crate::browser::{GtagAnalytics, NavigatorClipboard, TimeoutScheduler, WindowLocation};
use crate::config::INTERACTIONS;

type PageClipboard = ClipboardCopyController<NavigatorClipboard, TimeoutScheduler>;
type PageInterceptor = OutboundLinkInterceptor<GtagAnalytics, WindowLocation, LinkAnonymizer>;

/// Copy handle returned by [`use_copy_clipboard`].
#[derive(Clone, Copy)]
pub struct CopyClipboard {
    copied: RwSignal<Option<String>>,
    controller: StoredValue<PageClipboard, LocalStorage>,
}

impl CopyClipboard {
    /// Reactive: re-runs the caller when the copied value changes.
    pub fn is_copied(&self, value: &str) -> bool {
        self.copied.with(|copied| copied.as_deref() == Some(value))
    }

    /// Copy in the background; failures are logged and leave the flag down.
    pub fn copy(&self, value: impl Into<String>) {
        let Some(controller) = self.controller.try_get_value() else {
            return;
        };
        let value = value.into();

        spawn_local(async move {
            if let Err(e) = controller.trigger(value).await {
                leptos::logging::warn!("Copy to clipboard failed: {}", e);
            }
        });
    }
}

/// Clipboard copy with a "copied" flag that drops after the configured delay.
pub fn use_copy_clipboard() -> CopyClipboard {
    let copied = RwSignal::new(None::<String>);

    let controller = ClipboardCopyController::new(NavigatorClipboard, TimeoutScheduler, INTERACTIONS.copy.feedback());
    // The write may resolve after the component is gone
    controller.set_listener(move |value| {
        let _ = copied.try_set(value.map(str::to_string));
    });

    CopyClipboard {
        copied,
        controller: StoredValue::new_local(controller),
    }
}

/// Shared outbound link interceptor, provided once by the app root.
#[derive(Clone, Copy)]
pub struct OutboundLinks(StoredValue<PageInterceptor, LocalStorage>);

impl OutboundLinks {
    pub fn new() -> Self {
        let interceptor = OutboundLinkInterceptor::new(
            GtagAnalytics::new(INTERACTIONS.outbound.clone()),
            WindowLocation,
            INTERACTIONS.anonymize.clone(),
        );
        Self(StoredValue::new_local(interceptor))
    }

    /// `on:click` handler body for an external anchor.
    pub fn handle_click(&self, href: &str, target: Option<&str>, ev: &MouseEvent) {
        let Some(click) = OutboundClickEvent::from_click(href, target, ev.button(), ev.ctrl_key(), ev.meta_key())
        else {
            return;
        };
        let Some(outcome) = self.0.try_with_value(|interceptor| interceptor.intercept(&click)) else {
            return;
        };

        if outcome.prevents_default() {
            ev.prevent_default();
        }
    }
}

impl Default for OutboundLinks {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_outbound_links() {
    provide_context(OutboundLinks::new());
}

/// The app-wide interceptor, or a private one when rendered outside the app.
pub fn use_outbound_links() -> OutboundLinks {
    use_context::<OutboundLinks>().unwrap_or_default()
}
