//! Outbound link anonymization.
//!
//! Links leaving the page are reported to analytics and, for same-tab clicks,
//! navigated to. Both use the anonymized form so neither the analytics sink
//! nor the destination learns who referred the user.

use serde::Deserialize;
use url::Url;
use url::form_urlencoded;

/// Turns an href into the form that may be logged and navigated to.
pub trait Anonymizer {
    fn anonymize(&self, href: &str) -> String;
}

impl<F> Anonymizer for F
where
    F: Fn(&str) -> String,
{
    fn anonymize(&self, href: &str) -> String {
        self(href)
    }
}

const REDACTED: &str = "***";

/// Query/fragment stripping plus address redaction for block explorers.
///
/// Doubles as the `[anonymize]` section of `interactions.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkAnonymizer {
    /// Drop the whole query string. When false only `stripped_params` go.
    pub strip_all_query: bool,
    /// Query parameter names removed when `strip_all_query` is off
    pub stripped_params: Vec<String>,
    pub strip_fragment: bool,
    /// Hosts (and their subdomains) whose `0x…` path segments are redacted
    pub explorer_hosts: Vec<String>,
}

impl Default for LinkAnonymizer {
    fn default() -> Self {
        Self {
            strip_all_query: true,
            stripped_params: ["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content", "ref", "referrer"]
                .into_iter()
                .map(String::from)
                .collect(),
            strip_fragment: false,
            explorer_hosts: [
                "etherscan.io",
                "optimistic.etherscan.io",
                "arbiscan.io",
                "polygonscan.com",
                "bscscan.com",
                "basescan.org",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl LinkAnonymizer {
    fn filter_query(&self, query: &str) -> Option<String> {
        if self.strip_all_query {
            return None;
        }

        let kept: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .filter(|(name, _)| !self.stripped_params.iter().any(|p| p.eq_ignore_ascii_case(name)))
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();

        if kept.is_empty() {
            return None;
        }

        Some(form_urlencoded::Serializer::new(String::new()).extend_pairs(kept).finish())
    }

    fn is_explorer(&self, base: &str) -> bool {
        let Ok(url) = Url::parse(base) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };

        self.explorer_hosts.iter().any(|explorer| {
            host.eq_ignore_ascii_case(explorer)
                || host
                    .strip_suffix(explorer.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn redact_addresses(&self, base: &str) -> String {
        if !self.is_explorer(base) {
            return base.to_string();
        }

        // is_explorer succeeded, so there is a scheme separator
        let Some(scheme_end) = base.find("://") else {
            return base.to_string();
        };
        let authority_start = scheme_end + 3;
        let path_start = base[authority_start..]
            .find('/')
            .map_or(base.len(), |i| authority_start + i);
        let (origin, path) = base.split_at(path_start);

        let path = path
            .split('/')
            .map(|segment| if looks_like_address(segment) { REDACTED } else { segment })
            .collect::<Vec<_>>()
            .join("/");

        format!("{}{}", origin, path)
    }
}

impl Anonymizer for LinkAnonymizer {
    fn anonymize(&self, href: &str) -> String {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (href, None),
        };
        let (base, query) = match rest.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (rest, None),
        };

        let mut out = self.redact_addresses(base);

        if let Some(query) = query.and_then(|q| self.filter_query(q)) {
            out.push('?');
            out.push_str(&query);
        }

        if let Some(fragment) = fragment.filter(|_| !self.strip_fragment) {
            out.push('#');
            out.push_str(fragment);
        }

        out
    }
}

fn looks_like_address(segment: &str) -> bool {
    segment
        .strip_prefix("0x")
        .or_else(|| segment.strip_prefix("0X"))
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
