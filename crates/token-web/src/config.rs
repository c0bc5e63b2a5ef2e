//! Static page content and the interaction settings baked into the bundle.

use std::sync::LazyLock;

use token_interactions::InteractionConfig;

const INTERACTIONS_TOML: &str = include_str!("../interactions.toml");

/// Parsed `interactions.toml`, or the defaults if it fails to parse.
pub static INTERACTIONS: LazyLock<InteractionConfig> = LazyLock::new(|| {
    match INTERACTIONS_TOML.parse::<InteractionConfig>() {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::warn!("Invalid interactions.toml, using defaults: {:#}", e);
            InteractionConfig::default()
        }
    }
});

pub struct TokenLinks {
    pub explorer: &'static str,
    pub website: &'static str,
    pub docs: &'static str,
    pub coingecko: &'static str,
}

pub struct TokenInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub address: &'static str,
    pub network: &'static str,
    pub description: &'static str,
    pub links: TokenLinks,
}

pub const TOKEN: TokenInfo = TokenInfo {
    name: "Uniswap",
    symbol: "UNI",
    address: "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
    network: "Ethereum",
    description: "Governance token of the Uniswap protocol.",
    links: TokenLinks {
        explorer: "https://etherscan.io/token/0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
        website: "https://uniswap.org/?utm_source=token-page",
        docs: "https://docs.uniswap.org/concepts/governance/overview",
        coingecko: "https://www.coingecko.com/en/coins/uniswap",
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn bundled_interactions_file_is_valid() {
        let config: InteractionConfig = INTERACTIONS_TOML.parse().expect("interactions.toml should parse");
        assert_eq!(config.copy.feedback(), Duration::from_secs(2));
        assert_eq!(config.outbound.completion_timeout(), None);
        assert!(config.anonymize.explorer_hosts.iter().any(|h| h == "etherscan.io"));
    }

    #[test]
    fn explorer_link_is_anonymized_to_redacted_address() {
        use token_interactions::Anonymizer;

        assert_eq!(INTERACTIONS.anonymize.anonymize(TOKEN.links.explorer), "https://etherscan.io/token/***");
        assert_eq!(INTERACTIONS.anonymize.anonymize(TOKEN.links.website), "https://uniswap.org/");
    }
}
