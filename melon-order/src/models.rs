use crate::error::OrderError;
use chrono::{DateTime, Utc};
use melon_catalog::{PriceQuote, PricingEngine, QuoteRequest};
use melon_core::{
    validate_quantity, validate_splurge_factor, OrderCategory, SplurgeSource, ValidationError,
};
use serde::Serialize;
use uuid::Uuid;

/// Category-specific order data
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum OrderDetails {
    Domestic,
    International { country_code: String },
    Government { passed_inspection: bool },
}

impl OrderDetails {
    pub fn category(&self) -> OrderCategory {
        match self {
            OrderDetails::Domestic => OrderCategory::Domestic,
            OrderDetails::International { .. } => OrderCategory::International,
            OrderDetails::Government { .. } => OrderCategory::Government,
        }
    }
}

/// A melon purchase order.
///
/// Quantity, species and category are fixed once built. The splurge factor
/// is drawn once at construction; only the shipped flag and the inspection
/// result of a government order change afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct MelonOrder {
    id: Uuid,
    species: String,
    quantity: i32,
    details: OrderDetails,
    splurge_factor: i32,
    shipped: bool,
    created_at: DateTime<Utc>,
    shipped_at: Option<DateTime<Utc>>,
}

impl MelonOrder {
    /// Validate inputs and draw the splurge factor
    pub fn new(
        species: impl Into<String>,
        quantity: i32,
        details: OrderDetails,
        splurge: &dyn SplurgeSource,
    ) -> Result<Self, OrderError> {
        let species = species.into();

        if let Err(err) = validate_quantity(quantity) {
            tracing::warn!(%species, quantity, "Rejected melon order: {}", err);
            return Err(err.into());
        }

        if let OrderDetails::International { country_code } = &details {
            if country_code.trim().is_empty() {
                tracing::warn!(%species, quantity, "Rejected international order without country code");
                return Err(ValidationError::MissingCountryCode.into());
            }
        }

        let splurge_factor = match validate_splurge_factor(splurge.draw()) {
            Ok(factor) => factor,
            Err(err) => {
                tracing::warn!(%species, quantity, "Rejected melon order: {}", err);
                return Err(err.into());
            }
        };

        Ok(Self {
            id: Uuid::new_v4(),
            species,
            quantity,
            details,
            splurge_factor,
            shipped: false,
            created_at: Utc::now(),
            shipped_at: None,
        })
    }

    /// Build a domestic order
    pub fn domestic(
        species: impl Into<String>,
        quantity: i32,
        splurge: &dyn SplurgeSource,
    ) -> Result<Self, OrderError> {
        Self::new(species, quantity, OrderDetails::Domestic, splurge)
    }

    /// Build an international order for a destination country
    pub fn international(
        species: impl Into<String>,
        quantity: i32,
        country_code: impl Into<String>,
        splurge: &dyn SplurgeSource,
    ) -> Result<Self, OrderError> {
        let details = OrderDetails::International {
            country_code: country_code.into(),
        };
        Self::new(species, quantity, details, splurge)
    }

    /// Build a government order, not yet inspected
    pub fn government(
        species: impl Into<String>,
        quantity: i32,
        splurge: &dyn SplurgeSource,
    ) -> Result<Self, OrderError> {
        let details = OrderDetails::Government {
            passed_inspection: false,
        };
        Self::new(species, quantity, details, splurge)
    }

    /// Order identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Melon species as ordered
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Number of melons
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Customer category, fixed by the constructor
    pub fn category(&self) -> OrderCategory {
        self.details.category()
    }

    /// Category-specific data
    pub fn details(&self) -> &OrderDetails {
        &self.details
    }

    /// Tax rate of the order category
    pub fn tax_rate(&self) -> f64 {
        self.category().tax_rate()
    }

    /// Factor drawn at construction, always within 5..=9
    pub fn splurge_factor(&self) -> i32 {
        self.splurge_factor
    }

    /// Whether the order has shipped
    pub fn is_shipped(&self) -> bool {
        self.shipped
    }

    /// Construction time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the first shipment
    pub fn shipped_at(&self) -> Option<DateTime<Utc>> {
        self.shipped_at
    }

    /// Present only on international orders.
    pub fn country_code(&self) -> Option<&str> {
        match &self.details {
            OrderDetails::International { country_code } => Some(country_code.as_str()),
            _ => None,
        }
    }

    /// Present only on government orders.
    pub fn passed_inspection(&self) -> Option<bool> {
        match self.details {
            OrderDetails::Government { passed_inspection } => Some(passed_inspection),
            _ => None,
        }
    }

    /// Mark as shipped. Repeat calls keep the first shipment time.
    pub fn mark_shipped(&mut self) {
        if self.shipped {
            return;
        }
        self.shipped = true;
        self.shipped_at = Some(Utc::now());
        tracing::info!(order_id = %self.id, category = %self.category(), "Melon order shipped");
    }

    /// Record an inspection result on a government order.
    pub fn inspect_melon(&mut self, passed: bool) -> Result<(), OrderError> {
        let category = self.category();
        match &mut self.details {
            OrderDetails::Government { passed_inspection } => {
                *passed_inspection = passed;
                tracing::info!(order_id = %self.id, passed, "Melon inspection recorded");
                Ok(())
            }
            _ => Err(OrderError::UnsupportedOperation {
                operation: "inspect_melon",
                category,
            }),
        }
    }

    fn quote_request(&self) -> QuoteRequest<'_> {
        QuoteRequest {
            species: &self.species,
            quantity: self.quantity,
            category: self.category(),
            splurge_factor: self.splurge_factor,
        }
    }

    /// Splurge factor plus the rush surcharge at the engine's current time.
    pub fn base_price(&self, engine: &PricingEngine) -> f64 {
        engine.base_price(self.splurge_factor)
    }

    /// Price breakdown at the engine's current time
    pub fn quote(&self, engine: &PricingEngine) -> PriceQuote {
        engine.quote(&self.quote_request())
    }

    /// Quoted total, unrounded
    pub fn total(&self, engine: &PricingEngine) -> f64 {
        self.quote(engine).total
    }
}
