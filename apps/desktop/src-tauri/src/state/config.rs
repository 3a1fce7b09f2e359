//! # Configuration State
//!
//! Application configuration loaded at startup. Read-only afterwards, so no
//! mutex is needed; if hot-reloading is ever added, wrap in `RwLock`.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shop name (displayed on order summaries).
    pub shop_name: String,

    /// Shop address lines.
    pub shop_address: Vec<String>,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Prefix for generated order numbers (e.g. "SC").
    pub order_number_prefix: String,
}

impl Default for ConfigState {
    /// Defaults suitable for development.
    fn default() -> Self {
        ConfigState {
            shop_name: "SignCraft Print & Sign".to_string(),
            shop_address: vec!["214 Commerce Way".to_string(), "City, ST 12345".to_string()],
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            order_number_prefix: "SC".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables over defaults.
    ///
    /// ## Environment Variables
    /// - `SIGNCRAFT_SHOP_NAME`: override shop name
    /// - `SIGNCRAFT_ORDER_PREFIX`: override order number prefix
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(shop_name) = std::env::var("SIGNCRAFT_SHOP_NAME") {
            config.shop_name = shop_name;
        }

        if let Ok(prefix) = std::env::var("SIGNCRAFT_ORDER_PREFIX") {
            config.order_number_prefix = prefix;
        }

        config
    }

    /// Formats a cent amount as a currency string, for logs and summaries.
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }
}
