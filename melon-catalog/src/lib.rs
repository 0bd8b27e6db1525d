pub mod pricing;

pub use pricing::{PriceQuote, PricingConfig, PricingConfigError, PricingEngine, QuoteRequest};
