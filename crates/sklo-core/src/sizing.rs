//! # Cut-Size Derivation
//!
//! Derives cut dimensions for the two fixed cabinet sub-assemblies: side
//! glass panels and the back panel. Purely geometric - nothing here touches
//! pricing, and the pricing engine never calls in here. The caller feeds
//! the resulting dimensions into a [`QuoteRequest`](crate::pricing::QuoteRequest)
//! if it wants the pieces priced.
//!
//! The `summary` string on every result is Ukrainian order-sheet text for
//! the cutting workshop; it is presentation output, not logic.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SelectorError;
use crate::units::{area_m2_from_mm, clamp_non_negative, round2};

/// Clearance trimmed off the cabinet depth for a side glass panel, mm.
pub const SIDE_TRIM_MM: f64 = 3.5;

/// Side glass sheet thickness, mm.
pub const SIDE_GLASS_THICKNESS_MM: f64 = 4.0;

/// Height taken off the mount height for the back panel, mm.
pub const BACK_HEIGHT_OFFSET_MM: f64 = 38.0;

// =============================================================================
// Selectors
// =============================================================================

/// Which cabinet sides get glass panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SideMode {
    /// No side glass.
    #[default]
    None,
    /// Left side only.
    Left,
    /// Right side only.
    Right,
    /// Both sides.
    Both,
}

impl SideMode {
    /// Panels per section for this mode.
    pub const fn side_count(&self) -> u32 {
        match self {
            SideMode::Both => 2,
            SideMode::Left | SideMode::Right => 1,
            SideMode::None => 0,
        }
    }
}

impl std::str::FromStr for SideMode {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SideMode::None),
            "left" => Ok(SideMode::Left),
            "right" => Ok(SideMode::Right),
            "both" => Ok(SideMode::Both),
            other => Err(SelectorError::UnknownSideMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for SideMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideMode::None => write!(f, "none"),
            SideMode::Left => write!(f, "left"),
            SideMode::Right => write!(f, "right"),
            SideMode::Both => write!(f, "both"),
        }
    }
}

/// Back panel material.
///
/// The material decides thickness and how much the cut is widened past the
/// clear span to sit in the groove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BackMaterial {
    /// 6 mm glass.
    Glass6,
    /// 8 mm board.
    Board8,
}

impl BackMaterial {
    /// Sheet thickness, mm.
    pub const fn thickness_mm(&self) -> f64 {
        match self {
            BackMaterial::Glass6 => 6.0,
            BackMaterial::Board8 => 8.0,
        }
    }

    /// Width added to the clear span for the groove seat, mm.
    pub const fn span_allowance_mm(&self) -> f64 {
        match self {
            BackMaterial::Glass6 => 11.0,
            BackMaterial::Board8 => 16.0,
        }
    }

    /// Order-sheet material label.
    fn label_uk(&self) -> &'static str {
        match self {
            BackMaterial::Glass6 => "скло 6 мм",
            BackMaterial::Board8 => "плита 8 мм",
        }
    }
}

impl std::str::FromStr for BackMaterial {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glass6" => Ok(BackMaterial::Glass6),
            "board8" => Ok(BackMaterial::Board8),
            other => Err(SelectorError::UnknownMaterial(other.to_string())),
        }
    }
}

impl std::fmt::Display for BackMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackMaterial::Glass6 => write!(f, "glass6"),
            BackMaterial::Board8 => write!(f, "board8"),
        }
    }
}

// =============================================================================
// Requests & Result
// =============================================================================

/// Geometry input for side glass panels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SidePanelRequest {
    /// Mount height of the section, mm.
    pub mount_height_mm: f64,
    /// Cabinet depth, mm.
    pub depth_mm: f64,
    /// Number of sections. Floored, minimum 0.
    pub sections: f64,
    /// Which sides get glass.
    pub side_mode: SideMode,
}

/// Geometry input for the back panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct BackPanelRequest {
    /// Clear span width between cabinet sides, mm.
    pub span_mm: f64,
    /// Mount height of the section, mm.
    pub mount_height_mm: f64,
    /// Back panel material; `None` means no back panel is applicable.
    pub material: Option<BackMaterial>,
}

/// Derived cut sizes for one sub-assembly.
///
/// A pure value recomputed fresh on every call; `summary` is the
/// order-sheet line for the workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssemblyPiece {
    /// Sheet thickness, mm.
    pub thickness_mm: f64,
    /// Cut width of one piece, mm.
    pub width_mm: f64,
    /// Cut height of one piece, mm.
    pub height_mm: f64,
    /// Area of one piece, m².
    pub piece_area_m2: f64,
    /// Total piece count.
    pub count: u32,
    /// Area of all pieces together, m².
    pub total_area_m2: f64,
    /// Order-sheet line (Ukrainian).
    pub summary: String,
}

// =============================================================================
// Side Glass Panels
// =============================================================================

/// Derives cut sizes for side glass panels.
///
/// Piece width is the cabinet depth minus the [`SIDE_TRIM_MM`] clearance
/// (never negative), piece height is the mount height, and the count is
/// sections × panels-per-section for the chosen [`SideMode`].
///
/// ## Example
/// ```rust
/// use sklo_core::sizing::{size_side_panels, SideMode, SidePanelRequest};
///
/// let pieces = size_side_panels(&SidePanelRequest {
///     mount_height_mm: 2000.0,
///     depth_mm: 500.0,
///     sections: 2.0,
///     side_mode: SideMode::Both,
/// });
/// assert_eq!(pieces.width_mm, 496.5);
/// assert_eq!(pieces.count, 4);
/// ```
pub fn size_side_panels(request: &SidePanelRequest) -> AssemblyPiece {
    let height_mm = clamp_non_negative(request.mount_height_mm);
    let depth_mm = clamp_non_negative(request.depth_mm);
    let width_mm = (depth_mm - SIDE_TRIM_MM).max(0.0);

    let sections = sanitize_sections(request.sections);
    let count = sections * request.side_mode.side_count();

    let piece_area_m2 = area_m2_from_mm(width_mm, height_mm);
    let total_area_m2 = piece_area_m2 * count as f64;

    let summary = format!(
        "Бокове скло {} мм: {}×{} мм — {} шт, разом {} м²",
        SIDE_GLASS_THICKNESS_MM,
        round2(width_mm),
        round2(height_mm),
        count,
        round2(total_area_m2),
    );

    AssemblyPiece {
        thickness_mm: SIDE_GLASS_THICKNESS_MM,
        width_mm,
        height_mm,
        piece_area_m2,
        count,
        total_area_m2,
        summary,
    }
}

/// Section counts floor like quantities but allow zero: a cabinet run with
/// no glazed sections is a valid, empty cut list.
fn sanitize_sections(sections: f64) -> u32 {
    if !sections.is_finite() {
        return 0;
    }
    sections.floor().max(0.0) as u32
}

// =============================================================================
// Back Panel
// =============================================================================

/// Derives the cut size for the back panel, or `None` when no recognized
/// material is given.
///
/// The cut is widened past the clear span by the material's groove
/// allowance and shortened by [`BACK_HEIGHT_OFFSET_MM`].
///
/// ## Example
/// ```rust
/// use sklo_core::sizing::{size_back_panel, BackMaterial, BackPanelRequest};
///
/// let piece = size_back_panel(&BackPanelRequest {
///     span_mm: 800.0,
///     mount_height_mm: 2000.0,
///     material: Some(BackMaterial::Glass6),
/// })
/// .unwrap();
/// assert_eq!(piece.width_mm, 811.0);
/// assert_eq!(piece.height_mm, 1962.0);
///
/// assert!(size_back_panel(&BackPanelRequest::default()).is_none());
/// ```
pub fn size_back_panel(request: &BackPanelRequest) -> Option<AssemblyPiece> {
    let material = request.material?;

    let width_mm = clamp_non_negative(request.span_mm) + material.span_allowance_mm();
    let height_mm = (clamp_non_negative(request.mount_height_mm) - BACK_HEIGHT_OFFSET_MM).max(0.0);
    let piece_area_m2 = area_m2_from_mm(width_mm, height_mm);

    let summary = format!(
        "Задня стінка ({}): {}×{} мм, {} м²",
        material.label_uk(),
        round2(width_mm),
        round2(height_mm),
        round2(piece_area_m2),
    );

    Some(AssemblyPiece {
        thickness_mm: material.thickness_mm(),
        width_mm,
        height_mm,
        piece_area_m2,
        count: 1,
        total_area_m2: piece_area_m2,
        summary,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_side_panels_worked_example() {
        let pieces = size_side_panels(&SidePanelRequest {
            mount_height_mm: 2000.0,
            depth_mm: 500.0,
            sections: 2.0,
            side_mode: SideMode::Both,
        });
        assert_close(pieces.width_mm, 496.5);
        assert_close(pieces.height_mm, 2000.0);
        assert_close(pieces.piece_area_m2, 0.993);
        assert_eq!(pieces.count, 4);
        assert_close(pieces.total_area_m2, 3.972);
        assert_close(pieces.thickness_mm, 4.0);
        assert!(pieces.summary.contains("4 шт"));
    }

    #[test]
    fn test_side_count_per_mode() {
        assert_eq!(SideMode::Both.side_count(), 2);
        assert_eq!(SideMode::Left.side_count(), 1);
        assert_eq!(SideMode::Right.side_count(), 1);
        assert_eq!(SideMode::None.side_count(), 0);

        let pieces = size_side_panels(&SidePanelRequest {
            mount_height_mm: 2000.0,
            depth_mm: 500.0,
            sections: 3.0,
            side_mode: SideMode::Left,
        });
        assert_eq!(pieces.count, 3);
    }

    #[test]
    fn test_side_panels_shallow_cabinet_clamps_width() {
        let pieces = size_side_panels(&SidePanelRequest {
            mount_height_mm: 2000.0,
            depth_mm: 2.0,
            sections: 1.0,
            side_mode: SideMode::Both,
        });
        assert_close(pieces.width_mm, 0.0);
        assert_close(pieces.total_area_m2, 0.0);
    }

    #[test]
    fn test_side_panels_zero_sections_is_empty() {
        let pieces = size_side_panels(&SidePanelRequest {
            mount_height_mm: 2000.0,
            depth_mm: 500.0,
            sections: 0.0,
            side_mode: SideMode::Both,
        });
        assert_eq!(pieces.count, 0);
        assert_close(pieces.total_area_m2, 0.0);
    }

    #[test]
    fn test_back_panel_worked_example() {
        let piece = size_back_panel(&BackPanelRequest {
            span_mm: 800.0,
            mount_height_mm: 2000.0,
            material: Some(BackMaterial::Glass6),
        })
        .expect("glass6 is a recognized material");
        assert_close(piece.width_mm, 811.0);
        assert_close(piece.height_mm, 1962.0);
        assert_close(piece.thickness_mm, 6.0);
        assert_close(piece.piece_area_m2, 1.591182);
        assert_eq!(piece.count, 1);
    }

    #[test]
    fn test_back_panel_board_allowances() {
        let piece = size_back_panel(&BackPanelRequest {
            span_mm: 800.0,
            mount_height_mm: 2000.0,
            material: Some(BackMaterial::Board8),
        })
        .expect("board8 is a recognized material");
        assert_close(piece.width_mm, 816.0);
        assert_close(piece.thickness_mm, 8.0);
    }

    #[test]
    fn test_back_panel_without_material_is_not_applicable() {
        assert!(size_back_panel(&BackPanelRequest {
            span_mm: 800.0,
            mount_height_mm: 2000.0,
            material: None,
        })
        .is_none());
    }

    #[test]
    fn test_back_panel_short_mount_clamps_height() {
        let piece = size_back_panel(&BackPanelRequest {
            span_mm: 800.0,
            mount_height_mm: 20.0,
            material: Some(BackMaterial::Glass6),
        })
        .unwrap();
        assert_close(piece.height_mm, 0.0);
        assert_close(piece.piece_area_m2, 0.0);
    }

    #[test]
    fn test_selectors_parse_and_reject() {
        assert_eq!("both".parse::<SideMode>(), Ok(SideMode::Both));
        assert_eq!("none".parse::<SideMode>(), Ok(SideMode::None));
        assert_eq!(
            "top".parse::<SideMode>(),
            Err(SelectorError::UnknownSideMode("top".to_string()))
        );

        assert_eq!("glass6".parse::<BackMaterial>(), Ok(BackMaterial::Glass6));
        assert_eq!(
            "plywood".parse::<BackMaterial>(),
            Err(SelectorError::UnknownMaterial("plywood".to_string()))
        );
    }

    #[test]
    fn test_selector_display_matches_wire_names() {
        assert_eq!(SideMode::Both.to_string(), "both");
        assert_eq!(BackMaterial::Board8.to_string(), "board8");
        assert_eq!(
            serde_json::to_string(&SideMode::Both).unwrap(),
            "\"both\""
        );
    }
}
