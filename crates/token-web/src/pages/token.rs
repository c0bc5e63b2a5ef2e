use leptos::prelude::*;

use crate::components::{CopyLinkIcon, ExternalLink, ExternalLinkIcon};
use crate::config::TOKEN;

#[component]
pub fn TokenPage() -> impl IntoView {
    let title = format!("{} ({})", TOKEN.name, TOKEN.symbol);

    view! {
        <main class="max-w-[80ch] mx-auto px-4 py-8 md:py-12">
            <header class="mb-8">
                <h1 class="font-bold text-2xl">{title}</h1>
                <div class="text-[var(--ink-light)] mt-2">{TOKEN.description}</div>
            </header>

            // Contract address with copy + explorer shortcuts
            <div class="mb-6 border border-dashed border-[var(--rule)] p-4">
                <div class="flex items-center">
                    <strong>"CONTRACT"</strong>
                    <span class="ml-4 font-mono break-all">{TOKEN.address}</span>
                    <CopyLinkIcon to_copy=TOKEN.address />
                    <ExternalLinkIcon href=TOKEN.links.explorer />
                </div>
                <div>
                    <strong>"NETWORK"</strong> "   " {TOKEN.network}
                </div>
            </div>

            <section id="links" class="mb-8">
                <h2 class="font-bold uppercase mb-3">"Links"</h2>
                <div class="flex flex-wrap gap-4">
                    <ExternalLink href=TOKEN.links.website>"Website"</ExternalLink>
                    <ExternalLink href=TOKEN.links.docs>"Governance docs"</ExternalLink>
                    <ExternalLink href=TOKEN.links.coingecko target="_self">"CoinGecko"</ExternalLink>
                    <ExternalLink href=TOKEN.links.explorer>"Etherscan"</ExternalLink>
                </div>
            </section>
        </main>
    }
}
