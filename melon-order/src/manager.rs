use crate::error::OrderError;
use crate::models::MelonOrder;
use melon_catalog::{PriceQuote, PricingEngine};
use melon_core::{OrderCategory, SplurgeSource};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Builds melon orders with the configured collaborators and tracks them
/// in memory
pub struct OrderManager {
    orders: HashMap<Uuid, MelonOrder>,
    pricing: PricingEngine,
    splurge: Arc<dyn SplurgeSource>,
}

impl OrderManager {
    /// Create a manager with the given pricing engine and splurge source
    pub fn new(pricing: PricingEngine, splurge: Arc<dyn SplurgeSource>) -> Self {
        Self {
            orders: HashMap::new(),
            pricing,
            splurge,
        }
    }

    /// Pricing engine used for quotes
    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    /// Create and store a domestic order
    pub fn create_domestic(&mut self, species: &str, quantity: i32) -> Result<MelonOrder, OrderError> {
        let order = MelonOrder::domestic(species, quantity, self.splurge.as_ref())?;
        Ok(self.store(order))
    }

    /// Create and store an international order
    pub fn create_international(
        &mut self,
        species: &str,
        quantity: i32,
        country_code: &str,
    ) -> Result<MelonOrder, OrderError> {
        let order = MelonOrder::international(species, quantity, country_code, self.splurge.as_ref())?;
        Ok(self.store(order))
    }

    /// Create and store a government order
    pub fn create_government(&mut self, species: &str, quantity: i32) -> Result<MelonOrder, OrderError> {
        let order = MelonOrder::government(species, quantity, self.splurge.as_ref())?;
        Ok(self.store(order))
    }

    fn store(&mut self, order: MelonOrder) -> MelonOrder {
        tracing::debug!(order_id = %order.id(), category = %order.category(), "Order created");
        self.orders.insert(order.id(), order.clone());
        order
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: &Uuid) -> Option<&MelonOrder> {
        self.orders.get(order_id)
    }

    /// Mark an order as shipped
    pub fn mark_shipped(&mut self, order_id: &Uuid) -> Result<(), OrderError> {
        self.get_order_mut(order_id)?.mark_shipped();
        Ok(())
    }

    /// Record an inspection result on a government order
    pub fn inspect_melon(&mut self, order_id: &Uuid, passed: bool) -> Result<(), OrderError> {
        self.get_order_mut(order_id)?.inspect_melon(passed)
    }

    /// Quote an order at the current time
    pub fn quote(&self, order_id: &Uuid) -> Result<PriceQuote, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .ok_or(OrderError::NotFound(*order_id))?;
        Ok(order.quote(&self.pricing))
    }

    /// Per-category counts of shipped and pending orders
    pub fn shipping_report(&self) -> serde_json::Value {
        let mut categories = serde_json::Map::new();

        for category in OrderCategory::ALL {
            let orders: Vec<&MelonOrder> = self
                .orders
                .values()
                .filter(|o| o.category() == category)
                .collect();
            let shipped = orders.iter().filter(|o| o.is_shipped()).count();

            let mut entry = serde_json::json!({
                "orders": orders.len(),
                "shipped": shipped,
                "pending": orders.len() - shipped,
                "melons": orders.iter().map(|o| o.quantity() as i64).sum::<i64>(),
            });

            if category == OrderCategory::Government {
                let passed = orders
                    .iter()
                    .filter(|o| o.passed_inspection() == Some(true))
                    .count();
                entry["passed_inspection"] = serde_json::json!(passed);
            }

            categories.insert(category.to_string(), entry);
        }

        serde_json::json!({
            "total_orders": self.orders.len(),
            "categories": categories,
        })
    }

    /// Helper to get mutable order reference
    fn get_order_mut(&mut self, order_id: &Uuid) -> Result<&mut MelonOrder, OrderError> {
        self.orders
            .get_mut(order_id)
            .ok_or(OrderError::NotFound(*order_id))
    }
}
