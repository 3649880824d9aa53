//! Remaining-time text.

use keepsake_core::RemainingSpan;
use serde::{Deserialize, Serialize};

/// Display language for countdown text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// `1年2月` / `3月4天`
    #[default]
    Zh,
    /// `1y 2m` / `3m 4d`
    En,
}

impl Locale {
    /// Parse a locale name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Some(Locale::Zh),
            "en" | "en-us" => Some(Locale::En),
            _ => None,
        }
    }
}

/// A remaining span rendered for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingText {
    span: RemainingSpan,
    locale: Locale,
}

impl RemainingText {
    /// Wrap a span for display.
    pub fn new(span: RemainingSpan, locale: Locale) -> Self {
        Self { span, locale }
    }
}

impl std::fmt::Display for RemainingText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let RemainingSpan { years, months, days } = self.span;
        match (self.locale, years > 0) {
            (Locale::Zh, true) => write!(f, "{years}年{months}月"),
            (Locale::Zh, false) => write!(f, "{months}月{days}天"),
            (Locale::En, true) => write!(f, "{years}y {months}m"),
            (Locale::En, false) => write!(f, "{months}m {days}d"),
        }
    }
}
