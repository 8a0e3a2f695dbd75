//! # Coefficient Tables
//!
//! Step-function multipliers used by the pricing engine.
//!
//! ## Table Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Three Step Functions                                │
//! │                                                                         │
//! │  Area tier (per piece)        k                                        │
//! │  billing area m² ───────────► 2.0 │ 1.5 │ 1.3 │ 1.2 │ 1.1 │ 1.0        │
//! │  thresholds (≥, descending)   7.5   6.5   5.5   4.5   3.5   below      │
//! │                                                                         │
//! │  Tempering batch (per party)  k                                        │
//! │  party area m² ─────────────► 2.0 │ 1.5 │ 1.3 │ 1.1 │ 1.05 │ 1.0       │
//! │  thresholds (<, ascending)    0.25  2.0   10    50    ≤100   above     │
//! │                                                                         │
//! │  Size surcharge (per piece)   k                                        │
//! │  max side mm ───────────────► 1.50 │ 1.35 │ 1.20 │ 1.00                │
//! │  thresholds (≥, descending)   3200   2800   2200   below               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each table is an ordered array of `(threshold, coefficient)` rows walked
//! by a single generic routine per boundary semantic, so inclusivity and
//! traversal direction are each expressed exactly once.

use crate::units::clamp_non_negative;

// =============================================================================
// Generic Step Lookups
// =============================================================================

/// Descending table: first row whose threshold the input reaches wins.
///
/// Rows must be ordered highest threshold first. The match is inclusive
/// (`x >= threshold`); inputs below every threshold get `default_k`.
fn step_at_least(rows: &[(f64, f64)], x: f64, default_k: f64) -> f64 {
    for &(threshold, k) in rows {
        if x >= threshold {
            return k;
        }
    }
    default_k
}

/// Ascending table: first row whose threshold the input stays under wins.
///
/// Rows must be ordered lowest threshold first. The match is exclusive
/// (`x < threshold`) unless the row is marked inclusive (`x <= threshold`);
/// inputs above every threshold get `default_k`.
fn step_below(rows: &[(f64, bool, f64)], x: f64, default_k: f64) -> f64 {
    for &(threshold, inclusive, k) in rows {
        if x < threshold || (inclusive && x == threshold) {
            return k;
        }
    }
    default_k
}

// =============================================================================
// Area Tier
// =============================================================================

/// Area-tier rows, largest pieces first.
const AREA_TIER_ROWS: [(f64, f64); 5] = [
    (7.5, 2.0),
    (6.5, 1.5),
    (5.5, 1.3),
    (4.5, 1.2),
    (3.5, 1.1),
];

/// Returns the area-tier coefficient for a piece's billing area.
///
/// Oversize pieces need wider stock sheets and more careful handling, so
/// the multiplier grows with the billing area of a single piece.
///
/// ## Example
/// ```rust
/// use sklo_core::coeff::area_tier_coefficient;
///
/// assert_eq!(area_tier_coefficient(1.0), 1.0);
/// assert_eq!(area_tier_coefficient(7.5), 2.0);
/// ```
pub fn area_tier_coefficient(billing_area_m2: f64) -> f64 {
    step_at_least(&AREA_TIER_ROWS, clamp_non_negative(billing_area_m2), 1.0)
}

// =============================================================================
// Tempering Batch
// =============================================================================

/// Batch rows, smallest parties first. The `(threshold, inclusive, k)`
/// triple marks the single `<=` boundary at 100 m².
const BATCH_ROWS: [(f64, bool, f64); 5] = [
    (0.25, false, 2.0),
    (2.0, false, 1.5),
    (10.0, false, 1.3),
    (50.0, false, 1.1),
    (100.0, true, 1.05),
];

/// Returns the tempering batch coefficient for a party area.
///
/// A party is all pieces of one type tempered together; tiny parties waste
/// furnace capacity and carry the steepest multiplier, large parties
/// approach 1.0.
///
/// ## Example
/// ```rust
/// use sklo_core::coeff::batch_coefficient;
///
/// assert_eq!(batch_coefficient(0.1), 2.0);
/// assert_eq!(batch_coefficient(25.0), 1.1);
/// assert_eq!(batch_coefficient(500.0), 1.0);
/// ```
pub fn batch_coefficient(party_area_m2: f64) -> f64 {
    step_below(&BATCH_ROWS, clamp_non_negative(party_area_m2), 1.0)
}

// =============================================================================
// Size Surcharge
// =============================================================================

/// Size-surcharge rows over the longest side, largest first.
const SIZE_SURCHARGE_ROWS: [(f64, f64); 3] = [
    (3200.0, 1.50),
    (2800.0, 1.35),
    (2200.0, 1.20),
];

/// Returns the size-surcharge coefficient from a piece's longest side.
///
/// Applied to material and polish cost only, never to tempering.
pub fn size_surcharge_coefficient(width_mm: f64, height_mm: f64) -> f64 {
    let max_side = clamp_non_negative(width_mm).max(clamp_non_negative(height_mm));
    step_at_least(&SIZE_SURCHARGE_ROWS, max_side, 1.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
