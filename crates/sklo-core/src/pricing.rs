//! # Pricing Engine
//!
//! Turns a piece's geometry and tariffs into a full retail price breakdown.
//!
//! ## Quote Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quote Computation                                  │
//! │                                                                         │
//! │  QuoteRequest (width, height, qty, tariffs, overrides)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sanitize inputs ──► billing area = max(raw area, config minimum)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kArea lookup ──► material cost + polish cost                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  × kSize (oversize surcharge, material+polish only) = base cost        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Tempering? ──► party area ──► kBatch ──► total, floored to minimum    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  net = base + tempering ──► × discount ──► × markup ──► per piece      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceBreakdown (every intermediate echoed, nothing rounded)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Total By Design
//! The engine must never fail a quote request, only produce a (possibly
//! zero) quote. Malformed numbers are clamped at the boundary and degrade
//! to zero-cost components; there is no error path here at all.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::coeff::{area_tier_coefficient, batch_coefficient, size_surcharge_coefficient};
use crate::config::{get_config, PricingConfig};
use crate::units::{area_m2_from_mm, clamp_non_negative, perimeter_m, sanitize_qty};

// =============================================================================
// Tempering Minimum Category
// =============================================================================

/// Which tempering minimum charge an order falls under.
///
/// Plain float glass has its own, lower furnace minimum; every other order
/// category (tinted, patterned, laminated stock) shares the higher one.
/// Unknown wire strings deserialize to [`TemperMinCategory::Other`], which
/// mirrors how the minimum is resolved: the float minimum applies only when
/// the category says exactly so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TemperMinCategory {
    /// Plain float glass.
    Float,
    /// Every other order category.
    #[default]
    #[serde(other)]
    Other,
}

impl std::str::FromStr for TemperMinCategory {
    type Err = std::convert::Infallible;

    /// Total parse: exactly `"float"` selects the float minimum, anything
    /// else is `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "float" {
            TemperMinCategory::Float
        } else {
            TemperMinCategory::Other
        })
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// A per-piece pricing request.
///
/// ## Override Fields
/// The `Option` fields follow one precedence rule everywhere: an explicit
/// value on the request wins, otherwise the configuration in effect for the
/// call decides. `Default` produces a sparse request so callers (and sparse
/// JSON bodies) only name what they care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct QuoteRequest {
    /// Piece width, mm.
    pub width_mm: f64,

    /// Piece height, mm.
    pub height_mm: f64,

    /// Piece count. Floored to a whole number, minimum 1.
    pub qty: f64,

    /// Material price per m².
    pub material_price: f64,

    /// Edge polishing price per running meter.
    pub polish_price: f64,

    /// Tempering flag; `None` falls back to the configured default.
    pub tempered: Option<bool>,

    /// Tempering tariff per m². Tempering with a zero tariff costs nothing.
    pub temper_tariff: f64,

    /// Which tempering minimum charge applies.
    pub temper_min_category: TemperMinCategory,

    /// Per-call override of the float-glass tempering minimum.
    pub temper_min_float: Option<f64>,

    /// Per-call override of the other-category tempering minimum.
    pub temper_min_other: Option<f64>,

    /// Oversize surcharge toggle; `None` falls back to the configured default.
    pub size_surcharge: Option<bool>,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        QuoteRequest {
            width_mm: 0.0,
            height_mm: 0.0,
            qty: 1.0,
            material_price: 0.0,
            polish_price: 0.0,
            tempered: None,
            temper_tariff: 0.0,
            temper_min_category: TemperMinCategory::Other,
            temper_min_float: None,
            temper_min_other: None,
            size_surcharge: None,
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The complete result of pricing one piece type.
///
/// Every intermediate the engine computed is echoed so the order-entry UI
/// can show the full cost build-up. Values are **not** rounded; apply
/// [`round2`](crate::units::round2) when presenting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    /// Sanitized piece width, mm.
    pub width_mm: f64,
    /// Sanitized piece height, mm.
    pub height_mm: f64,
    /// Sanitized piece count.
    pub qty: u32,

    /// Raw geometric area of one piece, m².
    pub area_m2: f64,
    /// Area the piece is billed at: raw area floored to the configured minimum.
    pub billing_area_m2: f64,
    /// Polished edge length of one piece, m.
    pub edge_len_m: f64,
    /// Billing area of the whole tempering party (billing area × qty), m².
    pub party_area_m2: f64,

    /// Applied area-tier coefficient.
    pub k_area: f64,
    /// Applied tempering batch coefficient (1.0 when tempering is off).
    pub k_batch: f64,
    /// Applied oversize surcharge coefficient (1.0 when disabled).
    pub k_size: f64,

    /// Material cost: billing area × material price.
    pub material_cost: f64,
    /// Edge polishing cost: edge length × polish price.
    pub polish_cost: f64,
    /// (material + polish) × kSize.
    pub base_cost: f64,

    /// Sanitized tempering tariff per m².
    pub temper_tariff: f64,
    /// Resolved minimum tempering charge (0 when tempering is off).
    pub temper_min: f64,
    /// Tempering total for the party, never below `temper_min` when active.
    pub temper_total: f64,

    /// Net cost: base cost + tempering total.
    pub net_cost: f64,
    /// Net cost after the fixed retail discount.
    pub retail_net: f64,
    /// Final retail total after the fixed markup.
    pub retail_total: f64,
    /// Retail total divided by the piece count.
    pub retail_per_piece: f64,
}

// =============================================================================
// Override Resolution
// =============================================================================

/// Resolves one value through the call → config precedence chain.
///
/// Kept as a single helper so the precedence rule (explicit per-call value
/// wins, configured value otherwise) is written once and tested once; the
/// configured side already carries the crate default as its own fallback.
#[inline]
fn override_or<T: Copy>(explicit: Option<T>, configured: T) -> T {
    explicit.unwrap_or(configured)
}

// =============================================================================
// Engine
// =============================================================================

/// Prices a piece against the shared configuration store.
///
/// Convenience wrapper over [`price_glass_piece_with`] for hosts that keep
/// their defaults in the process-wide store.
pub fn price_glass_piece(request: &QuoteRequest) -> PriceBreakdown {
    let config = get_config();
    price_glass_piece_with(request, &config)
}

/// Prices a piece against an explicit configuration handle.
///
/// This is the whole engine: pure, synchronous and total. Two calls with
/// the same request and config always produce the same breakdown.
///
/// ## Example
/// ```rust
/// use sklo_core::pricing::{price_glass_piece_with, QuoteRequest};
/// use sklo_core::config::PricingConfig;
///
/// let quote = price_glass_piece_with(
///     &QuoteRequest {
///         width_mm: 600.0,
///         height_mm: 400.0,
///         qty: 2.0,
///         material_price: 480.0,
///         ..QuoteRequest::default()
///     },
///     &PricingConfig::default(),
/// );
///
/// // 0.24 m² is billed as the 0.25 m² minimum
/// assert_eq!(quote.billing_area_m2, 0.25);
/// ```
pub fn price_glass_piece_with(request: &QuoteRequest, config: &PricingConfig) -> PriceBreakdown {
    // 1. Sanitize everything up front; the rest of the engine assumes
    //    clean non-negative numbers.
    let width_mm = clamp_non_negative(request.width_mm);
    let height_mm = clamp_non_negative(request.height_mm);
    let qty = sanitize_qty(request.qty);
    let material_price = clamp_non_negative(request.material_price);
    let polish_price = clamp_non_negative(request.polish_price);
    let temper_tariff = clamp_non_negative(request.temper_tariff);

    // 2. Billing area floors the raw area to the configured minimum; the
    //    minimum itself is not overridable per call.
    let area_m2 = area_m2_from_mm(width_mm, height_mm);
    let billing_area_m2 = area_m2.max(clamp_non_negative(config.min_area_m2));

    // 3-4. Area tier and the two per-piece cost components.
    let k_area = area_tier_coefficient(billing_area_m2);
    let material_cost = billing_area_m2 * material_price;
    let edge_len_m = perimeter_m(width_mm, height_mm);
    let polish_cost = edge_len_m * polish_price;

    // 5. Oversize surcharge hits material and polish only, never tempering.
    let k_size = if override_or(request.size_surcharge, config.size_surcharge_default) {
        size_surcharge_coefficient(width_mm, height_mm)
    } else {
        1.0
    };
    let base_cost = (material_cost + polish_cost) * k_size;

    // 6-7. Tempering: the whole party is priced together, and an active
    //      order never comes out below the category minimum.
    let tempered = override_or(request.tempered, config.tempered_default);
    let party_area_m2 = billing_area_m2 * qty as f64;
    let (k_batch, temper_min, temper_total) = if tempered && temper_tariff > 0.0 {
        let k_batch = batch_coefficient(party_area_m2);
        let temper_min = clamp_non_negative(match request.temper_min_category {
            TemperMinCategory::Float => {
                override_or(request.temper_min_float, config.temper_min_float)
            }
            TemperMinCategory::Other => {
                override_or(request.temper_min_other, config.temper_min_other)
            }
        });
        let raw_total = temper_tariff * billing_area_m2 * k_area * qty as f64 * k_batch;
        (k_batch, temper_min, raw_total.max(temper_min))
    } else {
        (1.0, 0.0, 0.0)
    };

    // 8-11. Net cost, then the fixed discount/markup pair.
    let net_cost = base_cost + temper_total;
    let retail_net = net_cost * clamp_non_negative(config.mt_discount);
    let retail_total = retail_net * clamp_non_negative(config.mt_markup);
    let retail_per_piece = retail_total / qty as f64;

    debug!(
        width_mm,
        height_mm,
        qty,
        billing_area_m2,
        net_cost,
        retail_total,
        "glass piece priced"
    );

    PriceBreakdown {
        width_mm,
        height_mm,
        qty,
        area_m2,
        billing_area_m2,
        edge_len_m,
        party_area_m2,
        k_area,
        k_batch,
        k_size,
        material_cost,
        polish_cost,
        base_cost,
        temper_tariff,
        temper_min,
        temper_total,
        net_cost,
        retail_net,
        retail_total,
        retail_per_piece,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// f64 assert helper in the spirit of exact money tests: the engine is
    /// deterministic, so tolerances only absorb binary representation error.
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn default_config() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_billing_area_floors_to_minimum() {
        let quote = price_glass_piece_with(
            &QuoteRequest {
                width_mm: 100.0,
                height_mm: 100.0,
                ..QuoteRequest::default()
            },
            &default_config(),
        );
        assert_close(quote.area_m2, 0.01);
        assert_close(quote.billing_area_m2, 0.25);

        // Even a degenerate 0×0 piece bills the minimum area
        let quote = price_glass_piece_with(&QuoteRequest::default(), &default_config());
        assert_close(quote.area_m2, 0.0);
        assert_close(quote.billing_area_m2, 0.25);
    }

    #[test]
    fn test_qty_is_coerced_to_whole_pieces() {
        let config = default_config();
        for (given, expected) in [(0.0, 1), (-3.0, 1), (2.7, 2), (f64::NAN, 1)] {
            let quote = price_glass_piece_with(
                &QuoteRequest {
                    qty: given,
                    ..QuoteRequest::default()
                },
                &config,
            );
            assert_eq!(quote.qty, expected, "qty {given} should coerce to {expected}");
        }
    }

    #[test]
    fn test_retail_composition_identity() {
        let config = default_config();
        let quote = price_glass_piece_with(
            &QuoteRequest {
                width_mm: 2300.0,
                height_mm: 1200.0,
                qty: 3.0,
                material_price: 420.0,
                polish_price: 35.0,
                tempered: Some(true),
                temper_tariff: 180.0,
                ..QuoteRequest::default()
            },
            &config,
        );
        // Retail total is exactly (base + tempering) × discount × markup
        assert_close(
            quote.retail_total,
            ((quote.material_cost + quote.polish_cost) * quote.k_size + quote.temper_total)
                * config.mt_discount
                * config.mt_markup,
        );
        assert_close(quote.retail_per_piece * quote.qty as f64, quote.retail_total);
        // 2300 mm longest side lands in the 1.20 surcharge band
        assert_close(quote.k_size, 1.20);
    }

    #[test]
    fn test_tempering_total_never_below_minimum() {
        let quote = price_glass_piece_with(
            &QuoteRequest {
                width_mm: 300.0,
                height_mm: 300.0,
                tempered: Some(true),
                temper_tariff: 50.0,
                ..QuoteRequest::default()
            },
            &default_config(),
        );
        // 50 × 0.25 × 1.0 × 1 × 2.0 = 25, floored to the 999 other-minimum
        assert_close(quote.temper_min, 999.0);
        assert_close(quote.temper_total, 999.0);
        assert!(quote.temper_total >= quote.temper_min);
    }

    #[test]
    fn test_float_category_uses_float_minimum() {
        let quote = price_glass_piece_with(
            &QuoteRequest {
                tempered: Some(true),
                temper_tariff: 50.0,
                temper_min_category: TemperMinCategory::Float,
                ..QuoteRequest::default()
            },
            &default_config(),
        );
        assert_close(quote.temper_min, 750.0);
        assert_close(quote.temper_total, 750.0);

        // A per-call override beats the configured minimum
        let quote = price_glass_piece_with(
            &QuoteRequest {
                tempered: Some(true),
                temper_tariff: 50.0,
                temper_min_category: TemperMinCategory::Float,
                temper_min_float: Some(500.0),
                ..QuoteRequest::default()
            },
            &default_config(),
        );
        assert_close(quote.temper_min, 500.0);
    }

    #[test]
    fn test_explicit_tempering_off_wins_over_tariff() {
        let mut config = default_config();
        config.tempered_default = true;
        let quote = price_glass_piece_with(
            &QuoteRequest {
                width_mm: 1000.0,
                height_mm: 1000.0,
                tempered: Some(false),
                temper_tariff: 200.0,
                ..QuoteRequest::default()
            },
            &config,
        );
        assert_close(quote.temper_total, 0.0);
        assert_close(quote.temper_min, 0.0);
        assert_close(quote.k_batch, 1.0);
    }

    #[test]
    fn test_zero_tariff_means_free_tempering() {
        let quote = price_glass_piece_with(
            &QuoteRequest {
                tempered: Some(true),
                temper_tariff: 0.0,
                ..QuoteRequest::default()
            },
            &default_config(),
        );
        assert_close(quote.temper_total, 0.0);
        assert_close(quote.k_batch, 1.0);
    }

    #[test]
    fn test_size_surcharge_toggle_precedence() {
        let config = default_config();
        let oversize = QuoteRequest {
            width_mm: 3300.0,
            height_mm: 1000.0,
            material_price: 400.0,
            ..QuoteRequest::default()
        };

        // Config default (on) applies the 1.50 band
        let quote = price_glass_piece_with(&oversize, &config);
        assert_close(quote.k_size, 1.50);

        // Explicit per-call off beats the config default
        let quote = price_glass_piece_with(
            &QuoteRequest {
                size_surcharge: Some(false),
                ..oversize.clone()
            },
            &config,
        );
        assert_close(quote.k_size, 1.0);
        assert_close(quote.base_cost, quote.material_cost + quote.polish_cost);
    }

    /// The worked end-to-end example: 1000×1000 mm float-less piece at
    /// 500 UAH/m², tempered at 200 UAH/m² under the "other" minimum.
    #[test]
    fn test_end_to_end_worked_example() {
        let quote = price_glass_piece_with(
            &QuoteRequest {
                width_mm: 1000.0,
                height_mm: 1000.0,
                qty: 1.0,
                material_price: 500.0,
                polish_price: 0.0,
                tempered: Some(true),
                temper_tariff: 200.0,
                temper_min_category: TemperMinCategory::Other,
                ..QuoteRequest::default()
            },
            &default_config(),
        );

        assert_close(quote.area_m2, 1.0);
        assert_close(quote.billing_area_m2, 1.0);
        assert_close(quote.k_area, 1.0);
        assert_close(quote.material_cost, 500.0);
        assert_close(quote.polish_cost, 0.0);
        assert_close(quote.base_cost, 500.0);
        assert_close(quote.party_area_m2, 1.0);
        assert_close(quote.k_batch, 1.5);
        // 200 × 1.0 × 1.0 × 1 × 1.5 = 300, floored to the 999 minimum
        assert_close(quote.temper_min, 999.0);
        assert_close(quote.temper_total, 999.0);
        assert_close(quote.net_cost, 1499.0);
        assert_close(quote.retail_net, 1274.15);
        assert_close(quote.retail_total, 1656.395);
        assert_close(quote.retail_per_piece, 1656.395);
    }

    #[test]
    fn test_malformed_request_degrades_to_zero_quote() {
        let quote = price_glass_piece_with(
            &QuoteRequest {
                width_mm: f64::NAN,
                height_mm: -500.0,
                qty: -1.0,
                material_price: f64::INFINITY,
                polish_price: -10.0,
                ..QuoteRequest::default()
            },
            &default_config(),
        );
        assert_eq!(quote.qty, 1);
        assert_close(quote.area_m2, 0.0);
        assert_close(quote.billing_area_m2, 0.25);
        assert_close(quote.net_cost, 0.0);
        assert_close(quote.retail_total, 0.0);
    }

    /// The shared-store path; priced with an all-zero request so the result
    /// is independent of whatever defaults other tests may be patching.
    #[test]
    fn test_global_path_smoke() {
        let quote = price_glass_piece(&QuoteRequest::default());
        assert_eq!(quote.qty, 1);
        assert_close(quote.net_cost, 0.0);
        assert_close(quote.retail_total, 0.0);
    }

    #[test]
    fn test_category_parses_totally() {
        assert_eq!("float".parse::<TemperMinCategory>(), Ok(TemperMinCategory::Float));
        assert_eq!("other".parse::<TemperMinCategory>(), Ok(TemperMinCategory::Other));
        // Exactly "float" selects the float minimum, anything else is Other
        assert_eq!("Float".parse::<TemperMinCategory>(), Ok(TemperMinCategory::Other));
        assert_eq!("".parse::<TemperMinCategory>(), Ok(TemperMinCategory::Other));
    }

    #[test]
    fn test_override_or_precedence() {
        assert_eq!(override_or(Some(5.0), 7.0), 5.0);
        assert_eq!(override_or(None, 7.0), 7.0);
        assert!(!override_or(Some(false), true));
    }

    #[test]
    fn test_request_deserializes_from_sparse_camel_case_json() {
        let request: QuoteRequest = serde_json::from_value(serde_json::json!({
            "widthMm": 1000.0,
            "heightMm": 1000.0,
            "materialPrice": 500.0,
            "tempered": true,
            "temperTariff": 200.0,
            "temperMinCategory": "sandblasted",
        }))
        .unwrap();
        // Unnamed fields fall back to the sparse defaults
        assert_eq!(request.qty, 1.0);
        assert_eq!(request.tempered, Some(true));
        // Unknown categories collapse to Other
        assert_eq!(request.temper_min_category, TemperMinCategory::Other);
    }
}
