//! Outbound link events through Google Analytics' `gtag`.
//!
//! The event is sent as
//! `gtag('event', <action>, { event_category, event_label, transport_type, event_callback })`
//! and `event_callback` carries the completion continuation. When gtag is not
//! on the page (blocked, not configured) the continuation only runs if a
//! completion timeout is configured.

use token_interactions::Analytics;
use token_interactions::config::OutboundConfig;

#[derive(Debug, Clone)]
pub struct GtagAnalytics {
    config: OutboundConfig,
}

impl GtagAnalytics {
    pub fn new(config: OutboundConfig) -> Self {
        Self { config }
    }
}

impl Analytics for GtagAnalytics {
    #[cfg(feature = "hydrate")]
    fn report_outbound_link(&self, label: &str, on_complete: Box<dyn FnOnce()>) {
        hydrate::send_event(&self.config, label, on_complete);
    }

    #[cfg(not(feature = "hydrate"))]
    fn report_outbound_link(&self, label: &str, _on_complete: Box<dyn FnOnce()>) {
        leptos::logging::warn!(
            "Outbound link {} reported outside the browser ({} / {})",
            label,
            self.config.event_category,
            self.config.event_action
        );
    }
}

#[cfg(feature = "hydrate")]
mod hydrate {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::{Closure, JsValue};

    use token_interactions::config::OutboundConfig;

    fn gtag() -> Option<Function> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str("gtag"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn set(target: &Object, key: &str, value: &JsValue) {
        let _ = Reflect::set(target, &JsValue::from_str(key), value);
    }

    pub(super) fn send_event(config: &OutboundConfig, label: &str, on_complete: Box<dyn FnOnce()>) {
        // Shared between gtag's callback and the timeout; whichever comes first runs it
        let slot = Rc::new(RefCell::new(Some(on_complete)));
        let complete = move || {
            let callback = slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        };

        if let Some(timeout) = config.completion_timeout() {
            let complete = complete.clone();
            let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, complete).forget();
        }

        let Some(gtag) = gtag() else {
            leptos::logging::warn!("gtag not loaded, outbound link event for {} not sent", label);
            return;
        };

        let params = Object::new();
        set(&params, "event_category", &JsValue::from_str(&config.event_category));
        set(&params, "event_label", &JsValue::from_str(label));
        set(&params, "transport_type", &JsValue::from_str(&config.transport));
        set(&params, "event_callback", &Closure::once_into_js(complete));

        if let Err(e) = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(&config.event_action),
            &params,
        ) {
            leptos::logging::warn!("gtag call failed for {}: {:?}", label, e);
        }
    }
}
