use token_interactions::{Clipboard, ClipboardError};

/// `navigator.clipboard.writeText`
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigatorClipboard;

impl Clipboard for NavigatorClipboard {
    #[cfg(feature = "hydrate")]
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        use wasm_bindgen::{JsCast, JsValue};

        let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        let navigator = window.navigator();

        // navigator.clipboard is undefined on insecure origins
        let has_clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|value| !value.is_undefined())
            .unwrap_or(false);
        if !has_clipboard {
            return Err(ClipboardError::Unavailable);
        }

        wasm_bindgen_futures::JsFuture::from(navigator.clipboard().write_text(text))
            .await
            .map(|_| ())
            .map_err(|err| {
                let reason = err
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.name()))
                    .or_else(|| err.as_string())
                    .unwrap_or_else(|| format!("{:?}", err));
                ClipboardError::rejected(reason)
            })
    }

    #[cfg(not(feature = "hydrate"))]
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}
