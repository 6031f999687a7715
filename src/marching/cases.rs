//! Contour table for the 16 marching-squares configurations
//!
//! Each entry lists the wall outline inside one square, always in the same
//! rotational order, so fanning from the first point gives every triangle
//! the same winding. The saddle cases (5 and 10) always join the two wall
//! corners through the middle of the square.

use super::nodes::{NodeId, Square};

/// A point of a square that a contour can pass through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    CentreTop,
    CentreRight,
    CentreBottom,
    CentreLeft,
}

impl Role {
    /// True for the four control-node corners.
    pub fn is_corner(self) -> bool {
        matches!(self, Role::TopLeft | Role::TopRight | Role::BottomRight | Role::BottomLeft)
    }
}

use Role::*;

/// Contour points indexed by configuration.
pub const CONTOURS: [&[Role]; 16] = [
    // 0: no walls
    &[],
    // one corner
    &[CentreLeft, CentreBottom, BottomLeft],
    &[BottomRight, CentreBottom, CentreRight],
    // 3: bottom edge
    &[CentreRight, BottomRight, BottomLeft, CentreLeft],
    &[TopRight, CentreRight, CentreTop],
    // 5: saddle, bottom-left + top-right
    &[CentreTop, TopRight, CentreRight, CentreBottom, BottomLeft, CentreLeft],
    // 6: right edge
    &[CentreTop, TopRight, BottomRight, CentreBottom],
    &[CentreTop, TopRight, BottomRight, BottomLeft, CentreLeft],
    &[TopLeft, CentreTop, CentreLeft],
    // 9: left edge
    &[TopLeft, CentreTop, CentreBottom, BottomLeft],
    // 10: saddle, top-left + bottom-right
    &[TopLeft, CentreTop, CentreRight, BottomRight, CentreBottom, CentreLeft],
    &[TopLeft, CentreTop, CentreRight, BottomRight, BottomLeft],
    // 12: top edge
    &[TopLeft, TopRight, CentreRight, CentreLeft],
    &[TopLeft, TopRight, CentreRight, CentreBottom, BottomLeft],
    &[TopLeft, TopRight, BottomRight, CentreBottom, CentreLeft],
    // 15: solid
    &[TopLeft, TopRight, BottomRight, BottomLeft],
];

/// Contour for a configuration.
///
/// # Panics
/// If `configuration` is not a 4-bit value. Squares derive it from four
/// booleans, so anything larger means the square was corrupted.
pub fn contour(configuration: u8) -> &'static [Role] {
    assert!(configuration < 16, "marching-squares configuration {configuration} is outside 0..16");
    CONTOURS[configuration as usize]
}

impl Square {
    /// The node playing `role` in this square.
    pub fn node(&self, role: Role) -> NodeId {
        match role {
            TopLeft => self.top_left,
            TopRight => self.top_right,
            BottomRight => self.bottom_right,
            BottomLeft => self.bottom_left,
            CentreTop => self.centre_top,
            CentreRight => self.centre_right,
            CentreBottom => self.centre_bottom,
            CentreLeft => self.centre_left,
        }
    }
}
