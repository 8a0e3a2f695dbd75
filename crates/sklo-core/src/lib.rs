//! # sklo-core: Pure Business Logic for Sklo
//!
//! This crate is the **heart** of Sklo, a pricing and cut-sizing engine for
//! furniture glass. It contains all business logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Sklo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Order-Entry Frontend (external)                 │   │
//! │  │    Piece form ──► Quote view ──► Cut list ──► Order print      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON / generated TS types              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ sklo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   units   │  │   coeff   │  │  pricing  │  │  sizing   │  │   │
//! │  │   │  clamping │  │ step fns  │  │  engine   │  │  panels   │  │   │
//! │  │   │  rounding │  │  tiers    │  │ breakdown │  │  backs    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                       ┌───────────┐                            │   │
//! │  │                       │  config   │  shared defaults (RwLock)  │   │
//! │  │                       └───────────┘                            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Numeric sanitizing, unit conversion and rounding
//! - [`coeff`] - Step-function coefficient tables (area tier, batch, size)
//! - [`config`] - Pricing defaults and the process-wide configuration store
//! - [`pricing`] - The quote engine producing a full [`PriceBreakdown`]
//! - [`sizing`] - Cut-size derivation for side glass and back panels
//! - [`error`] - Selector parse errors for the text boundary
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Total Quoting**: The engine never fails a quote request - malformed
//!    numbers degrade to zero or minimum-clamped values, never to an error
//! 4. **Sanitize, Don't Reject**: Non-finite and negative inputs are clamped
//!    at the boundary so every downstream computation works on clean values
//!
//! ## Example Usage
//!
//! ```rust
//! use sklo_core::pricing::{price_glass_piece_with, QuoteRequest, TemperMinCategory};
//! use sklo_core::config::PricingConfig;
//! use sklo_core::units::round2;
//!
//! let request = QuoteRequest {
//!     width_mm: 1000.0,
//!     height_mm: 1000.0,
//!     qty: 1.0,
//!     material_price: 500.0,
//!     tempered: Some(true),
//!     temper_tariff: 200.0,
//!     temper_min_category: TemperMinCategory::Other,
//!     ..QuoteRequest::default()
//! };
//!
//! let quote = price_glass_piece_with(&request, &PricingConfig::default());
//!
//! // 500 material + 999 tempering minimum, then ×0.85 discount ×1.30 markup
//! assert_eq!(round2(quote.retail_total), 1656.4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coeff;
pub mod config;
pub mod error;
pub mod pricing;
pub mod sizing;
pub mod units;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sklo_core::PriceBreakdown` instead of
// `use sklo_core::pricing::PriceBreakdown`

pub use coeff::{area_tier_coefficient, batch_coefficient, size_surcharge_coefficient};
pub use config::{get_config, set_config, set_config_value, ConfigPatch, PricingConfig};
pub use error::SelectorError;
pub use pricing::{price_glass_piece, price_glass_piece_with, PriceBreakdown, QuoteRequest, TemperMinCategory};
pub use sizing::{size_back_panel, size_side_panels, AssemblyPiece, BackMaterial, BackPanelRequest, SideMode, SidePanelRequest};
pub use units::{area_m2_from_mm, perimeter_m, round2};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum billable area in m², applied to every piece.
///
/// ## Business Reason
/// Cutting, handling and edge work have a fixed floor cost, so a tiny
/// offcut is billed as if it were a quarter of a square meter.
pub const DEFAULT_MIN_BILLING_AREA_M2: f64 = 0.25;

/// Minimum tempering charge for float-glass orders, UAH.
///
/// The tempering furnace runs a full cycle no matter how little glass is
/// loaded; the minimum covers that cycle for plain float glass.
pub const TEMPER_MIN_FLOAT_UAH: f64 = 750.0;

/// Minimum tempering charge for all other order categories, UAH.
pub const TEMPER_MIN_OTHER_UAH: f64 = 999.0;

/// Fixed retail discount factor applied to the net cost.
pub const DEFAULT_MT_DISCOUNT: f64 = 0.85;

/// Fixed retail markup factor applied after the discount.
pub const DEFAULT_MT_MARKUP: f64 = 1.30;
