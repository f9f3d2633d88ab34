use catalogo_core::PricingTier;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::rows::{TierInput, VariantRow};

pub const INDIVIDUAL_TIER_NAME: &str = "Precio Individual";

/// Render a price with exactly two decimals, rounding half away from zero.
///
/// `9` → `"9.00"`, `9.005` → `"9.01"`, `12.5` → `"12.50"`.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    let mut rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Quantity-break tiers for a variant, in sheet order.
///
/// The single-unit tier is always present. Tiers 2 and 3 appear only when
/// both their minimum quantity and price are filled in; a half-filled pair
/// is skipped with a warning.
#[must_use]
pub fn build_pricing_tiers(variant: &VariantRow) -> Vec<PricingTier> {
    let mut tiers = vec![PricingTier {
        min_qty: 1,
        price: format_price(variant.tier1_price),
        tier_name: INDIVIDUAL_TIER_NAME.to_string(),
    }];

    let optional = [
        (2, &variant.tier2, "Mayoreo"),
        (3, &variant.tier3, "Gran Mayoreo"),
    ];
    for (tier, input, label) in optional {
        if let Some(pricing_tier) = optional_tier(variant, tier, input, label) {
            tiers.push(pricing_tier);
        }
    }

    tiers
}

fn optional_tier(
    variant: &VariantRow,
    tier: u8,
    input: &TierInput,
    label: &str,
) -> Option<PricingTier> {
    if input.is_partial() {
        tracing::warn!(
            variant_id = variant.variant_id,
            row = variant.row,
            tier,
            "pricing tier has only one of minQty/price; skipping it"
        );
    }
    let (min_qty, price) = input.complete()?;
    Some(PricingTier {
        min_qty,
        price: format_price(price),
        tier_name: format!("{label} ({min_qty}+)"),
    })
}
