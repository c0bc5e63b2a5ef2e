use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::hooks::use_outbound_links;

fn click_handler(href: String, target: String) -> impl FnMut(MouseEvent) + Send + Sync + 'static {
    let links = use_outbound_links();
    move |ev: MouseEvent| links.handle_click(&href, Some(target.as_str()), &ev)
}

/// Outbound link that reports the click to analytics before leaving the page
#[component]
pub fn ExternalLink(
    #[prop(into)] href: String,
    #[prop(into, default = "_blank".to_string())] target: String,
    #[prop(into, default = "noopener noreferrer".to_string())] rel: String,
    children: Children,
) -> impl IntoView {
    let on_click = click_handler(href.clone(), target.clone());

    view! {
        <a
            href=href
            target=target
            rel=rel
            on:click=on_click
            class="text-[var(--accent)] font-medium hover:opacity-60 active:opacity-40"
        >
            {children()}
        </a>
    }
}

/// Icon-only variant of [`ExternalLink`]
#[component]
pub fn ExternalLinkIcon(
    #[prop(into)] href: String,
    #[prop(into, default = "_blank".to_string())] target: String,
    #[prop(into, default = "noopener noreferrer".to_string())] rel: String,
) -> impl IntoView {
    let on_click = click_handler(href.clone(), target.clone());

    view! {
        <a
            href=href
            target=target
            rel=rel
            on:click=on_click
            aria-label="Open in new tab"
            class="inline-flex items-center justify-center ml-2 text-[var(--accent)] hover:opacity-60"
        >
            "\u{2197}"
        </a>
    }
}
