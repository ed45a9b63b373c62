//! Order summary shown next to the cart: subtotal, shipping, tax, and grand total.

use serde::Serialize;
use storefront_host::Money;

use crate::model::CartLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Shipping and tax rules applied by [`OrderSummary::for_items`].
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged on non-empty orders at or below the threshold.
    pub flat_shipping: Money,
    /// Tax rate in hundredths of a percent of the subtotal.
    pub tax_basis_points: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_cents(10_000),
            flat_shipping: Money::from_cents(999),
            tax_basis_points: 800,
        }
    }
}

impl PricingPolicy {
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() || subtotal > self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.flat_shipping
        }
    }

    pub fn tax_for(&self, subtotal: Money) -> Money {
        subtotal.scaled_by_basis_points(self.tax_basis_points)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// Amount still needed to qualify for free shipping; `None` once it applies or the cart is empty.
    pub free_shipping_remaining: Option<Money>,
}

impl OrderSummary {
    pub fn for_items(items: &[CartLine], policy: &PricingPolicy) -> Self {
        let item_count = items.iter().map(|line| u64::from(line.quantity)).sum();
        let subtotal: Money = items.iter().map(CartLine::line_total).sum();
        let shipping = policy.shipping_for(subtotal);
        let tax = policy.tax_for(subtotal);
        let free_shipping_remaining = (!subtotal.is_zero()
            && subtotal <= policy.free_shipping_threshold)
            .then(|| policy.free_shipping_threshold.saturating_sub(subtotal));

        Self {
            item_count,
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
            free_shipping_remaining,
        }
    }
}
