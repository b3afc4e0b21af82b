//! On-frame annotation geometry for the review player.
//!
//! Annotations are stored as normalized points in `[0,1]×[0,1]` relative
//! to the frame, never raw pixels, so a mark drawn on a 720p preview
//! lands in the same place on a 4K master. Only bounded two-point shapes
//! are supported: rectangle and ellipse derive from the bounding pair,
//! arrow is a directed two-point line. Freehand strokes are not part of
//! this backend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Shape kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Arrow,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Arrow => "arrow",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "rect" => Ok(Self::Rect),
            "ellipse" => Ok(Self::Ellipse),
            "arrow" => Ok(Self::Arrow),
            _ => Err(CoreError::Validation(format!(
                "Invalid annotation shape '{s}'. Must be one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    pub const ALL: &'static [&'static str] = &["rect", "ellipse", "arrow"];
}

// ---------------------------------------------------------------------------
// Normalized geometry
// ---------------------------------------------------------------------------

/// A point in normalized frame coordinates, both axes in `[0,1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Validate that both coordinates are finite and within `[0,1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (axis, v) in [("x", self.x), ("y", self.y)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(CoreError::Validation(format!(
                    "Annotation point {axis} must be within [0,1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Axis-aligned normalized bounding box of a two-point shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The box spanned by two corner points, in any order.
    pub fn from_points(a: NormPoint, b: NormPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Project the normalized box onto a concrete frame resolution.
    pub fn to_pixels(&self, frame_width: f64, frame_height: f64) -> (f64, f64, f64, f64) {
        (
            self.x * frame_width,
            self.y * frame_height,
            self.width * frame_width,
            self.height * frame_height,
        )
    }
}

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

/// A finished annotation as embedded in a feedback row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub shape: ShapeKind,
    /// Two normalized points: press and release. For rect/ellipse these
    /// bound the shape; for arrow they are tail and head.
    pub points: Vec<NormPoint>,
    /// Stroke color in `#RRGGBB`.
    pub color: String,
}

impl Annotation {
    /// Validate shape arity, point normalization, and color format.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.points.len() != 2 {
            return Err(CoreError::Validation(format!(
                "A {} annotation requires exactly 2 points, got {}",
                self.shape.as_str(),
                self.points.len()
            )));
        }
        for point in &self.points {
            point.validate()?;
        }
        validate_color_hex(&self.color)
    }

    /// The normalized bounding box of this annotation.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.points[0], self.points[1])
    }
}

/// Validate that a color string matches `#RRGGBB` hex format.
pub fn validate_color_hex(color: &str) -> Result<(), CoreError> {
    if color.len() != 7 || !color.starts_with('#') {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB hex format"
        )));
    }
    if !color[1..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must contain only hex digits after '#'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Three-phase drawing interaction
// ---------------------------------------------------------------------------

/// An in-progress annotation: pointer-down starts it, pointer-move
/// updates the second point, pointer-up finalizes.
#[derive(Debug, Clone)]
pub struct AnnotationDraft {
    shape: ShapeKind,
    color: String,
    anchor: NormPoint,
    cursor: NormPoint,
}

impl AnnotationDraft {
    /// Begin a draft at the pressed point. Both points start coincident.
    pub fn begin(shape: ShapeKind, color: &str, at: NormPoint) -> Result<Self, CoreError> {
        at.validate()?;
        validate_color_hex(color)?;
        Ok(Self {
            shape,
            color: color.to_string(),
            anchor: at,
            cursor: at,
        })
    }

    /// Move the second point while the pointer is down. Out-of-frame
    /// positions are rejected so the draft always stays normalized.
    pub fn update(&mut self, to: NormPoint) -> Result<(), CoreError> {
        to.validate()?;
        self.cursor = to;
        Ok(())
    }

    /// The bounding box the draft currently spans (for live preview).
    pub fn preview_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.anchor, self.cursor)
    }

    /// Finalize on pointer-up. A shape with no extent (the pointer never
    /// moved, or moved along a single axis for a bounded shape) is
    /// rejected rather than stored as invisible geometry.
    pub fn finish(self) -> Result<Annotation, CoreError> {
        let spans_area = {
            let bbox = self.preview_box();
            bbox.width > 0.0 && bbox.height > 0.0
        };
        let valid_extent = match self.shape {
            ShapeKind::Rect | ShapeKind::Ellipse => spans_area,
            ShapeKind::Arrow => self.anchor != self.cursor,
        };
        if !valid_extent {
            return Err(CoreError::Validation(format!(
                "A {} annotation must span a non-zero extent",
                self.shape.as_str()
            )));
        }

        Ok(Annotation {
            shape: self.shape,
            points: vec![self.anchor, self.cursor],
            color: self.color,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> NormPoint {
        NormPoint::new(x, y)
    }

    // -- ShapeKind ---------------------------------------------------------

    #[test]
    fn shape_round_trip() {
        for s in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn freehand_is_not_supported() {
        assert!(ShapeKind::from_str("freehand").is_err());
    }

    // -- NormPoint ---------------------------------------------------------

    #[test]
    fn points_within_unit_square_accepted() {
        assert!(p(0.0, 0.0).validate().is_ok());
        assert!(p(1.0, 1.0).validate().is_ok());
        assert!(p(0.25, 0.75).validate().is_ok());
    }

    #[test]
    fn points_outside_unit_square_rejected() {
        assert!(p(-0.1, 0.5).validate().is_err());
        assert!(p(0.5, 1.1).validate().is_err());
        assert!(p(f64::NAN, 0.5).validate().is_err());
    }

    // -- color -------------------------------------------------------------

    #[test]
    fn color_hex_validation() {
        assert!(validate_color_hex("#FF5733").is_ok());
        assert!(validate_color_hex("#aabbcc").is_ok());
        assert!(validate_color_hex("FF5733").is_err());
        assert!(validate_color_hex("#F57").is_err());
        assert!(validate_color_hex("#GGGGGG").is_err());
    }

    // -- Annotation validation ---------------------------------------------

    #[test]
    fn two_point_annotation_valid() {
        let ann = Annotation {
            shape: ShapeKind::Rect,
            points: vec![p(0.1, 0.2), p(0.4, 0.6)],
            color: "#FF5733".to_string(),
        };
        assert!(ann.validate().is_ok());
    }

    #[test]
    fn wrong_arity_rejected() {
        let ann = Annotation {
            shape: ShapeKind::Rect,
            points: vec![p(0.1, 0.2)],
            color: "#FF5733".to_string(),
        };
        assert!(ann.validate().is_err());
    }

    // -- resolution invariance ---------------------------------------------

    /// The same normalized rectangle projected onto two frame sizes must
    /// keep its aspect ratio and relative position.
    #[test]
    fn bounding_box_is_resolution_invariant() {
        let bbox = BoundingBox::from_points(p(0.25, 0.25), p(0.75, 0.5));

        let (x_hd, y_hd, w_hd, h_hd) = bbox.to_pixels(1280.0, 720.0);
        let (x_4k, y_4k, w_4k, h_4k) = bbox.to_pixels(3840.0, 2160.0);

        // Same relative position on both frames.
        assert!((x_hd / 1280.0 - x_4k / 3840.0).abs() < 1e-9);
        assert!((y_hd / 720.0 - y_4k / 2160.0).abs() < 1e-9);

        // Same aspect ratio (both frames are 16:9).
        assert!((w_hd / h_hd - w_4k / h_4k).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_normalizes_point_order() {
        let forward = BoundingBox::from_points(p(0.2, 0.3), p(0.6, 0.8));
        let reverse = BoundingBox::from_points(p(0.6, 0.8), p(0.2, 0.3));
        assert_eq!(forward, reverse);
        assert!((forward.width - 0.4).abs() < 1e-12);
        assert!((forward.height - 0.5).abs() < 1e-12);
    }

    // -- three-phase drawing -----------------------------------------------

    #[test]
    fn draw_interaction_produces_annotation() {
        let mut draft = AnnotationDraft::begin(ShapeKind::Rect, "#FF5733", p(0.1, 0.1)).unwrap();
        draft.update(p(0.3, 0.2)).unwrap();
        draft.update(p(0.5, 0.4)).unwrap();
        let ann = draft.finish().unwrap();

        assert_eq!(ann.shape, ShapeKind::Rect);
        assert_eq!(ann.points, vec![p(0.1, 0.1), p(0.5, 0.4)]);
        let bbox = ann.bounding_box();
        assert!((bbox.width - 0.4).abs() < 1e-12);
        assert!((bbox.height - 0.3).abs() < 1e-12);
    }

    #[test]
    fn draft_rejects_out_of_frame_updates() {
        let mut draft = AnnotationDraft::begin(ShapeKind::Arrow, "#FF5733", p(0.5, 0.5)).unwrap();
        assert!(draft.update(p(1.5, 0.5)).is_err());
        // Draft state unchanged by the rejected update.
        draft.update(p(0.9, 0.9)).unwrap();
        assert!(draft.finish().is_ok());
    }

    #[test]
    fn zero_extent_rect_rejected() {
        let draft = AnnotationDraft::begin(ShapeKind::Rect, "#FF5733", p(0.5, 0.5)).unwrap();
        assert!(draft.finish().is_err());
    }

    #[test]
    fn axis_aligned_rect_rejected() {
        let mut draft = AnnotationDraft::begin(ShapeKind::Rect, "#FF5733", p(0.1, 0.5)).unwrap();
        draft.update(p(0.9, 0.5)).unwrap();
        assert!(draft.finish().is_err());
    }

    #[test]
    fn horizontal_arrow_is_fine() {
        let mut draft = AnnotationDraft::begin(ShapeKind::Arrow, "#FF5733", p(0.1, 0.5)).unwrap();
        draft.update(p(0.9, 0.5)).unwrap();
        let ann = draft.finish().unwrap();
        assert_eq!(ann.points[0], p(0.1, 0.5));
        assert_eq!(ann.points[1], p(0.9, 0.5));
    }

    #[test]
    fn zero_length_arrow_rejected() {
        let draft = AnnotationDraft::begin(ShapeKind::Arrow, "#FF5733", p(0.4, 0.4)).unwrap();
        assert!(draft.finish().is_err());
    }

    #[test]
    fn begin_validates_color_and_point() {
        assert!(AnnotationDraft::begin(ShapeKind::Rect, "red", p(0.5, 0.5)).is_err());
        assert!(AnnotationDraft::begin(ShapeKind::Rect, "#FF5733", p(2.0, 0.5)).is_err());
    }
}
