//! # Pricing Configuration
//!
//! Workshop-wide pricing defaults and the process-wide store that holds them.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Per-call overrides on the QuoteRequest (highest priority)          │
//! │     tempered, temper minimums, size-surcharge toggle                   │
//! │                                                                         │
//! │  2. The PricingConfig in effect for the call                           │
//! │     either the shared store or an explicit handle                      │
//! │                                                                         │
//! │  3. Crate-level defaults (lowest priority)                             │
//! │     DEFAULT_* and TEMPER_MIN_* constants baked into Default            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The shared store is an `RwLock<PricingConfig>`: quoting takes a short
//! read lock for a snapshot, patching takes the write lock, and a reader
//! can never observe a partially-merged configuration. Callers who want no
//! shared state at all pass their own [`PricingConfig`] to
//! [`price_glass_piece_with`](crate::pricing::price_glass_piece_with).

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::{
    DEFAULT_MIN_BILLING_AREA_M2, DEFAULT_MT_DISCOUNT, DEFAULT_MT_MARKUP, TEMPER_MIN_FLOAT_UAH,
    TEMPER_MIN_OTHER_UAH,
};

// =============================================================================
// Pricing Config
// =============================================================================

/// Workshop-wide pricing defaults.
///
/// Every quote that does not override a field on the request picks it up
/// from here. No range validation happens at this layer - an out-of-range
/// value surfaces later as clamped behavior in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct PricingConfig {
    /// Whether pieces are tempered when the request does not say.
    pub tempered_default: bool,

    /// Minimum billable area in m². Requests may not override this.
    pub min_area_m2: f64,

    /// Minimum tempering charge for float-glass orders.
    pub temper_min_float: f64,

    /// Minimum tempering charge for every other order category.
    pub temper_min_other: f64,

    /// Fixed retail discount factor applied to the net cost.
    pub mt_discount: f64,

    /// Fixed retail markup factor applied after the discount.
    pub mt_markup: f64,

    /// Whether the oversize surcharge applies when the request does not say.
    pub size_surcharge_default: bool,
}

impl PricingConfig {
    /// The built-in defaults, usable in const context for the shared store.
    pub const fn new() -> Self {
        PricingConfig {
            tempered_default: false,
            min_area_m2: DEFAULT_MIN_BILLING_AREA_M2,
            temper_min_float: TEMPER_MIN_FLOAT_UAH,
            temper_min_other: TEMPER_MIN_OTHER_UAH,
            mt_discount: DEFAULT_MT_DISCOUNT,
            mt_markup: DEFAULT_MT_MARKUP,
            size_surcharge_default: true,
        }
    }

    /// Shallow-merges a patch into this configuration.
    ///
    /// `Some` fields overwrite, `None` fields are retained.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(v) = patch.tempered_default {
            self.tempered_default = v;
        }
        if let Some(v) = patch.min_area_m2 {
            self.min_area_m2 = v;
        }
        if let Some(v) = patch.temper_min_float {
            self.temper_min_float = v;
        }
        if let Some(v) = patch.temper_min_other {
            self.temper_min_other = v;
        }
        if let Some(v) = patch.mt_discount {
            self.mt_discount = v;
        }
        if let Some(v) = patch.mt_markup {
            self.mt_markup = v;
        }
        if let Some(v) = patch.size_surcharge_default {
            self.size_surcharge_default = v;
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig::new()
    }
}

// =============================================================================
// Config Patch
// =============================================================================

/// A partial update to [`PricingConfig`].
///
/// Mirrors the config field-for-field with every field optional, so a
/// sparse JSON object like `{"mtDiscount": 0.9}` patches one field and
/// leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ConfigPatch {
    pub tempered_default: Option<bool>,
    pub min_area_m2: Option<f64>,
    pub temper_min_float: Option<f64>,
    pub temper_min_other: Option<f64>,
    pub mt_discount: Option<f64>,
    pub mt_markup: Option<f64>,
    pub size_surcharge_default: Option<bool>,
}

// =============================================================================
// Shared Store
// =============================================================================

/// The process-wide configuration, read by every quote that does not carry
/// an explicit handle.
static SHARED_CONFIG: RwLock<PricingConfig> = RwLock::new(PricingConfig::new());

/// A panic while holding the lock cannot leave plain-data config in a bad
/// state, so a poisoned lock is recovered rather than propagated.
fn read_shared() -> PricingConfig {
    match SHARED_CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Returns a snapshot of the current shared configuration.
pub fn get_config() -> PricingConfig {
    read_shared()
}

/// Merges a patch into the shared configuration and returns the result.
pub fn set_config(patch: ConfigPatch) -> PricingConfig {
    let mut guard = match SHARED_CONFIG.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.apply(&patch);
    let merged = guard.clone();
    drop(guard);
    debug!(?patch, "pricing config patched");
    merged
}

/// Merges an untyped JSON patch into the shared configuration.
///
/// Anything that is not a JSON object (null, numbers, strings, arrays) is
/// a silent no-op that returns the configuration unchanged; unknown keys
/// inside an object are ignored. This is the entry point for patches that
/// arrive straight off the wire.
pub fn set_config_value(value: &serde_json::Value) -> PricingConfig {
    if !value.is_object() {
        debug!("ignoring non-object config patch");
        return read_shared();
    }
    match ConfigPatch::deserialize(value) {
        Ok(patch) => set_config(patch),
        Err(err) => {
            debug!(%err, "ignoring malformed config patch");
            read_shared()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
