//! Geometric primitives for diagram positioning.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Insets`] - Padding values for four sides
//! - [`Bounds`] - A rectangular box defined by minimum and maximum coordinates
//! - [`NodeBox`] - The measured box of a placed node, with border-anchor lookup
//!
//! # Coordinate System
//!
//! Stemma uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Origin at the top-left, X increasing rightward, Y increasing downward.
//! "Above" in this module always means smaller Y.

/// A 2D point in diagram coordinate space.
///
/// Points use `f32` coordinates and provide the small set of vector
/// operations the routing code needs.
///
/// # Examples
///
/// ```
/// # use stemma_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Rotates this vector a quarter turn counter-clockwise in screen
    /// coordinates: `(x, y)` becomes `(-y, x)`.
    ///
    /// Used to displace a curve control point sideways from the chord
    /// between two anchors.
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Converts a point and size into a bounds rectangle with this point
    /// at its center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// The dimensions of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new size with padding added to both dimensions.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if both width and height are zero.
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Spacing around an element with potentially different values per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value on all sides.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates insets with one value for left/right and another for
    /// top/bottom.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Returns the top inset value.
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value.
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value.
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value.
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of the left and right insets.
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of the top and bottom insets.
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

/// A rectangular bounding box with minimum and maximum coordinates.
///
/// Used to accumulate the extent of rendered content when sizing the
/// output document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        Self {
            min_x: center.x() - half_width,
            min_y: center.y() - half_height,
            max_x: center.x() + half_width,
            max_y: center.y() + half_height,
        }
    }

    /// Creates a degenerate bounds containing a single point.
    pub fn new_from_point(point: Point) -> Self {
        Self {
            min_x: point.x(),
            min_y: point.y(),
            max_x: point.x(),
            max_y: point.y(),
        }
    }

    /// Returns the minimum x-coordinate of the bounds.
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds.
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds.
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds.
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds.
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds.
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds.
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner as a point.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Merges two bounds into the smallest bounds containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds outward by the given insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// The measured box of a placed node: a center position plus the size
/// computed from its label.
///
/// A `NodeBox` is immutable once computed. Connector routing holds copies of
/// the boxes it anchors to and never mutates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    center: Point,
    size: Size,
}

impl NodeBox {
    /// Creates a node box from its center and size.
    pub fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// Returns the center of the box.
    pub fn center(self) -> Point {
        self.center
    }

    /// Returns the size of the box.
    pub fn size(self) -> Size {
        self.size
    }

    /// Returns the width of the box.
    pub fn width(self) -> f32 {
        self.size.width()
    }

    /// Returns the height of the box.
    pub fn height(self) -> f32 {
        self.size.height()
    }

    /// Returns the box extent as [`Bounds`].
    pub fn bounds(self) -> Bounds {
        self.center.to_bounds(self.size)
    }

    /// Returns the point where a line arriving from `origin` should touch
    /// this box, on the border rather than at the center.
    ///
    /// The dominant axis is chosen by comparing `|dy| * width` against
    /// `|dx| * height` (with `(dx, dy)` the vector from `origin` to the box
    /// center), which weighs the slope against the box's aspect ratio
    /// instead of a fixed 45° threshold. A vertical-dominant line meets the
    /// top edge when the origin lies above the box and the bottom edge when
    /// it lies below; a horizontal-dominant line meets the left or right
    /// edge symmetrically. The anchor always lands on the midpoint of the
    /// chosen edge.
    ///
    /// When `origin` coincides with the center, the horizontal branch wins
    /// with `dx = 0` and the anchor falls on the right edge. A zero-size box
    /// collapses every anchor to its center. Both cases return finite
    /// points; this function never fails.
    pub fn border_anchor(self, origin: Point) -> Point {
        let d = self.center.sub_point(origin);
        let half_width = self.width() / 2.0;
        let half_height = self.height() / 2.0;

        if d.y().abs() * self.width() > d.x().abs() * self.height() {
            // Vertical-dominant: the line pierces the top or bottom edge.
            let y = if d.y() > 0.0 {
                self.center.y() - half_height
            } else {
                self.center.y() + half_height
            };
            Point::new(self.center.x(), y)
        } else {
            // Horizontal-dominant, including the degenerate dx == dy == 0 case.
            let x = if d.x() > 0.0 {
                self.center.x() - half_width
            } else {
                self.center.x() + half_width
            };
            Point::new(x, self.center.y())
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn node_box_strategy() -> impl Strategy<Value = NodeBox> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| NodeBox::new(Point::new(x, y), Size::new(w, h)))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The anchor should always have finite coordinates.
    fn check_anchor_is_finite(node: NodeBox, origin: Point) -> Result<(), TestCaseError> {
        let anchor = node.border_anchor(origin);
        prop_assert!(anchor.x().is_finite());
        prop_assert!(anchor.y().is_finite());
        Ok(())
    }

    /// The anchor should lie on the midpoint of one of the four edges: one
    /// coordinate equals the center coordinate, the other equals
    /// center ± half-extent.
    fn check_anchor_is_an_edge_midpoint(node: NodeBox, origin: Point) -> Result<(), TestCaseError> {
        let anchor = node.border_anchor(origin);
        let center = node.center();
        let half_w = node.width() / 2.0;
        let half_h = node.height() / 2.0;

        let on_vertical_edge = approx_eq!(f32, anchor.y(), center.y(), epsilon = 0.001)
            && (approx_eq!(f32, anchor.x(), center.x() - half_w, epsilon = 0.001)
                || approx_eq!(f32, anchor.x(), center.x() + half_w, epsilon = 0.001));
        let on_horizontal_edge = approx_eq!(f32, anchor.x(), center.x(), epsilon = 0.001)
            && (approx_eq!(f32, anchor.y(), center.y() - half_h, epsilon = 0.001)
                || approx_eq!(f32, anchor.y(), center.y() + half_h, epsilon = 0.001));

        prop_assert!(
            on_vertical_edge || on_horizontal_edge,
            "anchor {anchor:?} is not an edge midpoint of {node:?}"
        );
        Ok(())
    }

    /// Reflecting the origin through the center flips the chosen edge but
    /// keeps the dominant axis.
    fn check_anchor_edge_flips_with_origin(
        node: NodeBox,
        offset: Point,
    ) -> Result<(), TestCaseError> {
        // Skip the tie where neither axis dominates for both offsets.
        prop_assume!(
            (offset.y().abs() * node.width() - offset.x().abs() * node.height()).abs() > 0.001
        );
        prop_assume!(offset.x().abs() > 0.001 && offset.y().abs() > 0.001);

        let center = node.center();
        let anchor = node.border_anchor(center.sub_point(offset));
        let mirrored = node.border_anchor(center.add_point(offset));

        let reflected = Point::new(
            2.0 * center.x() - anchor.x(),
            2.0 * center.y() - anchor.y(),
        );
        prop_assert!(approx_eq!(f32, mirrored.x(), reflected.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, mirrored.y(), reflected.y(), epsilon = 0.01));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn anchor_is_finite(node in node_box_strategy(), origin in point_strategy()) {
            check_anchor_is_finite(node, origin)?;
        }

        #[test]
        fn anchor_is_an_edge_midpoint(node in node_box_strategy(), origin in point_strategy()) {
            check_anchor_is_an_edge_midpoint(node, origin)?;
        }

        #[test]
        fn anchor_edge_flips_with_origin(node in node_box_strategy(), offset in point_strategy()) {
            check_anchor_edge_flips_with_origin(node, offset)?;
        }
    }
}
