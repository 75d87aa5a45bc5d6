//! Resize handles and hit-testing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CropArea, Point};

/// Error returned when parsing a [`ResizeHandle`] name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// Not one of `nw`, `n`, `ne`, `e`, `se`, `s`, `sw`, `w` or `move`.
    #[error("Unknown resize handle: {0}")]
    Unknown(String),
}

/// A draggable part of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
    /// The whole rectangle, translated without resizing.
    #[serde(rename = "move")]
    Move,
}

/// Which edge of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left or top edge; the opposite edge stays put.
    Start,
    /// Right or bottom edge; the opposite edge stays put.
    End,
    /// The handle does not resize along this axis.
    Fixed,
}

impl ResizeHandle {
    /// Corners first: hit-testing checks them before edges.
    pub const RESIZE_HANDLES: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::NorthEast,
        ResizeHandle::SouthEast,
        ResizeHandle::SouthWest,
        ResizeHandle::North,
        ResizeHandle::East,
        ResizeHandle::South,
        ResizeHandle::West,
    ];

    pub fn horizontal(self) -> Edge {
        match self {
            ResizeHandle::NorthWest | ResizeHandle::West | ResizeHandle::SouthWest => Edge::Start,
            ResizeHandle::NorthEast | ResizeHandle::East | ResizeHandle::SouthEast => Edge::End,
            ResizeHandle::North | ResizeHandle::South | ResizeHandle::Move => Edge::Fixed,
        }
    }

    pub fn vertical(self) -> Edge {
        match self {
            ResizeHandle::NorthWest | ResizeHandle::North | ResizeHandle::NorthEast => Edge::Start,
            ResizeHandle::SouthWest | ResizeHandle::South | ResizeHandle::SouthEast => Edge::End,
            ResizeHandle::East | ResizeHandle::West | ResizeHandle::Move => Edge::Fixed,
        }
    }

    pub fn is_corner(self) -> bool {
        self.horizontal() != Edge::Fixed && self.vertical() != Edge::Fixed
    }

    /// Where the handle is drawn on `crop`. `Move` sits at the centre.
    pub fn position(self, crop: &CropArea) -> Point {
        let along = |edge: Edge, start: f64, len: f64| match edge {
            Edge::Start => start,
            Edge::End => start + len,
            Edge::Fixed => start + len / 2.0,
        };
        Point::new(
            along(self.horizontal(), crop.x, crop.width),
            along(self.vertical(), crop.y, crop.height),
        )
    }

    /// Short name used by hosts (`"nw"`, `"se"`, `"move"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::NorthWest => "nw",
            ResizeHandle::North => "n",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::East => "e",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::South => "s",
            ResizeHandle::SouthWest => "sw",
            ResizeHandle::West => "w",
            ResizeHandle::Move => "move",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nw" => Ok(ResizeHandle::NorthWest),
            "n" => Ok(ResizeHandle::North),
            "ne" => Ok(ResizeHandle::NorthEast),
            "e" => Ok(ResizeHandle::East),
            "se" => Ok(ResizeHandle::SouthEast),
            "s" => Ok(ResizeHandle::South),
            "sw" => Ok(ResizeHandle::SouthWest),
            "w" => Ok(ResizeHandle::West),
            "move" => Ok(ResizeHandle::Move),
            other => Err(HandleError::Unknown(other.to_string())),
        }
    }
}

/// Find the resize handle under `point`, if any.
///
/// Corners are grabbed within `tolerance` of the corner point; edges within
/// `tolerance` of the edge line, anywhere along its span. Corners win where
/// both match. `Move` is never returned; the interior is left to the caller.
pub fn handle_at(point: Point, crop: &CropArea, tolerance: f64) -> Option<ResizeHandle> {
    let near = |a: f64, b: f64| (a - b).abs() <= tolerance;
    let within = |v: f64, start: f64, end: f64| v >= start - tolerance && v <= end + tolerance;

    ResizeHandle::RESIZE_HANDLES.into_iter().find(|handle| {
        let anchor = handle.position(crop);
        match (handle.horizontal(), handle.vertical()) {
            (Edge::Fixed, _) => near(point.y, anchor.y) && within(point.x, crop.x, crop.right()),
            (_, Edge::Fixed) => near(point.x, anchor.x) && within(point.y, crop.y, crop.bottom()),
            _ => near(point.x, anchor.x) && near(point.y, anchor.y),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> CropArea {
        CropArea::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn test_edges_per_handle() {
        assert_eq!(ResizeHandle::SouthEast.horizontal(), Edge::End);
        assert_eq!(ResizeHandle::SouthEast.vertical(), Edge::End);
        assert_eq!(ResizeHandle::NorthWest.horizontal(), Edge::Start);
        assert_eq!(ResizeHandle::North.horizontal(), Edge::Fixed);
        assert_eq!(ResizeHandle::West.vertical(), Edge::Fixed);
        assert!(ResizeHandle::SouthWest.is_corner());
        assert!(!ResizeHandle::East.is_corner());
        assert!(!ResizeHandle::Move.is_corner());
    }

    #[test]
    fn test_positions() {
        let crop = crop();
        assert_eq!(ResizeHandle::NorthWest.position(&crop), Point::new(100.0, 100.0));
        assert_eq!(ResizeHandle::SouthEast.position(&crop), Point::new(300.0, 200.0));
        assert_eq!(ResizeHandle::East.position(&crop), Point::new(300.0, 150.0));
        assert_eq!(ResizeHandle::Move.position(&crop), Point::new(200.0, 150.0));
    }

    #[test]
    fn test_handle_at_corner() {
        let hit = handle_at(Point::new(296.0, 204.0), &crop(), 8.0);
        assert_eq!(hit, Some(ResizeHandle::SouthEast));
    }

    #[test]
    fn test_handle_at_edge() {
        let hit = handle_at(Point::new(180.0, 97.0), &crop(), 8.0);
        assert_eq!(hit, Some(ResizeHandle::North));

        let hit = handle_at(Point::new(103.0, 160.0), &crop(), 8.0);
        assert_eq!(hit, Some(ResizeHandle::West));
    }

    #[test]
    fn test_handle_at_interior_and_outside() {
        assert_eq!(handle_at(Point::new(200.0, 150.0), &crop(), 8.0), None);
        assert_eq!(handle_at(Point::new(10.0, 10.0), &crop(), 8.0), None);
    }

    #[test]
    fn test_parse_round_trip() {
        for handle in ResizeHandle::RESIZE_HANDLES
            .into_iter()
            .chain([ResizeHandle::Move])
        {
            assert_eq!(handle.as_str().parse::<ResizeHandle>(), Ok(handle));
        }
        assert_eq!(
            "diagonal".parse::<ResizeHandle>(),
            Err(HandleError::Unknown("diagonal".to_string()))
        );
    }

    #[test]
    fn test_unknown_handle_error_display() {
        let err = "NW".parse::<ResizeHandle>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown resize handle: NW");
    }
}
