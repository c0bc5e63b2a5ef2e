//! Configuration for the page interactions (`interactions.toml`).
//!
//! Every key is optional; missing ones take the defaults below.
//!
//! ```toml
//! [copy]
//! feedback_ms = 2000
//!
//! [outbound]
//! event_category = "outbound"
//! event_action = "click"
//! transport = "beacon"
//! completion_timeout_ms = 1000
//!
//! [anonymize]
//! strip_all_query = true
//! stripped_params = ["utm_source", "ref"]
//! strip_fragment = false
//! explorer_hosts = ["etherscan.io"]
//! ```

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use crate::anonymize::LinkAnonymizer;
use crate::clipboard::DEFAULT_FEEDBACK;

/// Allowed range for the copied-flag lifetime
pub const FEEDBACK_RANGE_MS: RangeInclusive<u64> = 1000..=2000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub copy: CopyConfig,
    pub outbound: OutboundConfig,
    pub anonymize: LinkAnonymizer,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// How long the "Copied!" feedback stays visible
    pub feedback_ms: u64,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            feedback_ms: DEFAULT_FEEDBACK.as_millis() as u64,
        }
    }
}

impl CopyConfig {
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

/// Analytics event shape for outbound clicks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutboundConfig {
    pub event_category: String,
    pub event_action: String,
    /// gtag transport type; "beacon" survives page unload
    pub transport: String,
    /// Complete the analytics callback after this long even if the sink
    /// never answers. Unset means wait forever (same-tab clicks then stall).
    pub completion_timeout_ms: Option<u64>,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            event_category: "outbound".to_string(),
            event_action: "click".to_string(),
            transport: "beacon".to_string(),
            completion_timeout_ms: None,
        }
    }
}

impl OutboundConfig {
    pub fn completion_timeout(&self) -> Option<Duration> {
        self.completion_timeout_ms.map(Duration::from_millis)
    }
}

impl InteractionConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            FEEDBACK_RANGE_MS.contains(&self.copy.feedback_ms),
            "copy.feedback_ms must be between {} and {} (got {})",
            FEEDBACK_RANGE_MS.start(),
            FEEDBACK_RANGE_MS.end(),
            self.copy.feedback_ms
        );
        ensure!(
            !self.outbound.event_category.trim().is_empty(),
            "outbound.event_category must not be empty"
        );
        ensure!(
            !self.outbound.event_action.trim().is_empty(),
            "outbound.event_action must not be empty"
        );
        Ok(())
    }
}

impl FromStr for InteractionConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context(
            "Failed to parse interaction config. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (numbers for *_ms keys, string arrays for lists)",
        )?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: InteractionConfig = "".parse().unwrap();
        assert_eq!(config, InteractionConfig::default());
        assert_eq!(config.copy.feedback(), Duration::from_secs(2));
        assert_eq!(config.outbound.completion_timeout(), None);
        assert!(config.anonymize.strip_all_query);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: InteractionConfig = r#"
            [copy]
            feedback_ms = 1200

            [outbound]
            completion_timeout_ms = 800

            [anonymize]
            strip_all_query = false
            stripped_params = ["utm_source"]
        "#
        .parse()
        .unwrap();

        assert_eq!(config.copy.feedback(), Duration::from_millis(1200));
        assert_eq!(config.outbound.event_category, "outbound");
        assert_eq!(config.outbound.completion_timeout(), Some(Duration::from_millis(800)));
        assert_eq!(config.anonymize.stripped_params, vec!["utm_source"]);
        assert_eq!(config.anonymize.explorer_hosts, LinkAnonymizer::default().explorer_hosts);
    }

    #[test]
    fn rejects_feedback_outside_range() {
        for ms in [0, 999, 2001, 60_000] {
            let err = format!("[copy]\nfeedback_ms = {}", ms).parse::<InteractionConfig>().unwrap_err();
            assert!(err.to_string().contains("feedback_ms"), "{}", err);
        }
        assert!("[copy]\nfeedback_ms = 1000".parse::<InteractionConfig>().is_ok());
    }

    #[test]
    fn rejects_blank_event_names() {
        assert!("[outbound]\nevent_category = \" \"".parse::<InteractionConfig>().is_err());
        assert!("[outbound]\nevent_action = \"\"".parse::<InteractionConfig>().is_err());
    }

    #[test]
    fn rejects_bad_types() {
        assert!("[copy]\nfeedback_ms = \"fast\"".parse::<InteractionConfig>().is_err());
    }
}
