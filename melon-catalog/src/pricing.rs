use chrono::{Datelike, NaiveDateTime, Timelike};
use melon_core::{Clock, OrderCategory, SystemClock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pricing rule constants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Flat amount added to the base price during the morning rush
    pub rush_surcharge: f64,

    /// First hour of the rush window (inclusive)
    pub rush_start_hour: u32,

    /// Last hour of the rush window (inclusive)
    pub rush_end_hour: u32,

    /// Species that carries the markup (exact match)
    pub premium_species: String,

    /// Multiplier applied to the base price of the premium species
    pub premium_multiplier: f64,

    /// International orders below this quantity pay the small-order fee
    pub small_order_threshold: i32,

    /// Flat fee for small international orders; zero disables the rule
    pub small_order_fee: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rush_surcharge: 4.0,
            rush_start_hour: 8,
            rush_end_hour: 11,
            premium_species: "Christmas melon".to_string(),
            premium_multiplier: 1.5,
            small_order_threshold: 10,
            small_order_fee: 3.0,
        }
    }
}

/// Pricing rule values that would silently change the rules
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingConfigError {
    #[error("{field} must be an hour between 0 and 23, got {hour}")]
    InvalidHour { field: &'static str, hour: u32 },

    #[error("Rush window is empty: starts at {start} but ends at {end}")]
    EmptyRushWindow { start: u32, end: u32 },

    #[error("{field} must be zero or positive, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("premium_multiplier must be positive, got {0}")]
    NonPositiveMultiplier(f64),

    #[error("small_order_threshold must be zero or positive, got {0}")]
    NegativeThreshold(i32),
}

impl PricingConfig {
    /// Reject values that disable or invert a pricing rule
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        for (field, hour) in [
            ("rush_start_hour", self.rush_start_hour),
            ("rush_end_hour", self.rush_end_hour),
        ] {
            if hour > 23 {
                return Err(PricingConfigError::InvalidHour { field, hour });
            }
        }
        if self.rush_end_hour < self.rush_start_hour {
            return Err(PricingConfigError::EmptyRushWindow {
                start: self.rush_start_hour,
                end: self.rush_end_hour,
            });
        }

        for (field, value) in [
            ("rush_surcharge", self.rush_surcharge),
            ("small_order_fee", self.small_order_fee),
        ] {
            // NaN fails this comparison too
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PricingConfigError::NegativeAmount { field, value });
            }
        }

        if !(self.premium_multiplier > 0.0 && self.premium_multiplier.is_finite()) {
            return Err(PricingConfigError::NonPositiveMultiplier(self.premium_multiplier));
        }
        if self.small_order_threshold < 0 {
            return Err(PricingConfigError::NegativeThreshold(self.small_order_threshold));
        }
        Ok(())
    }
}

/// Inputs needed to price one order
#[derive(Debug, Clone, Copy)]
pub struct QuoteRequest<'a> {
    pub species: &'a str,
    pub quantity: i32,
    pub category: OrderCategory,
    pub splurge_factor: i32,
}

/// Breakdown of a computed order total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    /// Local time the clock reported when the quote was computed
    pub priced_at: NaiveDateTime,
    /// Splurge factor plus any rush surcharge, before the species markup
    pub base_price: f64,
    pub rush_applied: bool,
    pub species_multiplier: f64,
    pub tax_rate: f64,
    pub small_order_fee: f64,
    pub total: f64,
}

/// Applies the pricing rules against an injected clock
pub struct PricingEngine {
    config: PricingConfig,
    clock: Arc<dyn Clock>,
}

impl PricingEngine {
    pub fn new(config: PricingConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn with_system_clock(config: PricingConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Weekday (Mon-Fri) within the configured morning hours
    pub fn is_rush_hour(&self, at: NaiveDateTime) -> bool {
        let is_weekday = at.weekday().number_from_monday() <= 5;
        let hour = at.hour();
        is_weekday && hour >= self.config.rush_start_hour && hour <= self.config.rush_end_hour
    }

    /// Base price for a splurge factor at the current clock reading.
    /// Not memoized: two calls straddling the rush window disagree.
    pub fn base_price(&self, splurge_factor: i32) -> f64 {
        self.base_price_at(splurge_factor, self.clock.now())
    }

    fn base_price_at(&self, splurge_factor: i32, at: NaiveDateTime) -> f64 {
        let mut base_price = splurge_factor as f64;
        if self.is_rush_hour(at) {
            base_price += self.config.rush_surcharge;
        }
        base_price
    }

    pub fn species_multiplier(&self, species: &str) -> f64 {
        if species == self.config.premium_species {
            self.config.premium_multiplier
        } else {
            1.0
        }
    }

    pub fn small_order_fee(&self, category: OrderCategory, quantity: i32) -> f64 {
        if category == OrderCategory::International && quantity < self.config.small_order_threshold {
            self.config.small_order_fee
        } else {
            0.0
        }
    }

    /// Price an order. The clock is read once so the surcharge is
    /// consistent within a single quote.
    pub fn quote(&self, request: &QuoteRequest<'_>) -> PriceQuote {
        let priced_at = self.clock.now();
        let rush_applied = self.is_rush_hour(priced_at);
        let base_price = self.base_price_at(request.splurge_factor, priced_at);

        let species_multiplier = self.species_multiplier(request.species);
        let tax_rate = request.category.tax_rate();

        let marked_up = base_price * species_multiplier;
        let mut total = (1.0 + tax_rate) * request.quantity as f64 * marked_up;

        let small_order_fee = self.small_order_fee(request.category, request.quantity);
        total += small_order_fee;

        tracing::debug!(
            species = request.species,
            quantity = request.quantity,
            category = %request.category,
            base_price,
            rush_applied,
            total,
            "Priced melon order"
        );

        PriceQuote {
            priced_at,
            base_price,
            rush_applied,
            species_multiplier,
            tax_rate,
            small_order_fee,
            total,
        }
    }
}
