use leptos::prelude::*;

use crate::hooks::use_copy_clipboard;

#[component]
fn CopiedTooltip() -> impl IntoView {
    view! {
        <div class="absolute z-50 flex flex-col items-center translate-x-1 translate-y-8" role="status">
            <span class="text-[var(--ink)]">"\u{25B2}"</span>
            <div class="w-[60px] h-8 leading-8 text-center text-xs rounded-lg bg-[var(--ink)] text-[var(--paper)]">
                "Copied!"
            </div>
        </div>
    }
}

/// Copy icon that puts `to_copy` on the clipboard and briefly shows "Copied!"
#[component]
pub fn CopyLinkIcon(
    /// The text to copy when clicked
    #[prop(into)]
    to_copy: String,
) -> impl IntoView {
    let clipboard = use_copy_clipboard();
    let watched = to_copy.clone();
    let is_copied = move || clipboard.is_copied(&watched);

    view! {
        <div
            class="relative inline-flex items-center justify-center cursor-pointer"
            role="button"
            aria-label="Copy to clipboard"
            on:click=move |_| clipboard.copy(to_copy.clone())
        >
            <span class="ml-2 text-[var(--accent)]">"\u{2398}"</span>
            {move || is_copied().then(|| view! { <CopiedTooltip /> })}
        </div>
    }
}
