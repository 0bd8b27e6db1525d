use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer category of an order. Fixes the tax rate and which extra
/// operations an order supports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderCategory {
    Domestic,
    International,
    Government,
}

impl OrderCategory {
    pub const ALL: [OrderCategory; 3] = [
        OrderCategory::Domestic,
        OrderCategory::International,
        OrderCategory::Government,
    ];

    /// Tax applied to the order total, as a fraction.
    pub fn tax_rate(self) -> f64 {
        match self {
            OrderCategory::Domestic => 0.08,
            OrderCategory::International => 0.17,
            OrderCategory::Government => 0.00,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderCategory::Domestic => "domestic",
            OrderCategory::International => "international",
            OrderCategory::Government => "government",
        }
    }
}

impl fmt::Display for OrderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rates() {
        assert_eq!(OrderCategory::Domestic.tax_rate(), 0.08);
        assert_eq!(OrderCategory::International.tax_rate(), 0.17);
        assert_eq!(OrderCategory::Government.tax_rate(), 0.0);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&OrderCategory::International).unwrap();
        assert_eq!(json, "\"international\"");

        let parsed: OrderCategory = serde_json::from_str("\"government\"").unwrap();
        assert_eq!(parsed, OrderCategory::Government);
        assert_eq!(parsed.to_string(), "government");
    }
}
