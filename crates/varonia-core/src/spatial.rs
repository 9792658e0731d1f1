//! Decoded play-space snapshot. All geometry is in engine units (cm, Z-up).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    default_boundary_rgb, BOUNDARY_ALPHA, DEFAULT_ALERT_LIMIT, DEFAULT_BOUNDARY_MORE_VISIBLE,
    DEFAULT_DISPLAY_DISTANCE, DEFAULT_MAIN_BOUNDARY, DEFAULT_REVERSE, DEFAULT_VISIBLE,
    MIN_POLYGON_POINTS,
};
use crate::transform::Rotator;

/// Linear RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const RED: LinearColor = LinearColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Authored colors only carry RGB; alpha is always fully opaque.
    pub fn opaque(rgb: Vec3) -> Self {
        Self {
            r: rgb.x,
            g: rgb.y,
            b: rgb.z,
            a: BOUNDARY_ALPHA,
        }
    }
}

impl Default for LinearColor {
    fn default() -> Self {
        Self::opaque(default_boundary_rgb())
    }
}

/// One polygonal zone of the play-space: the main play area or a sub-zone
/// such as a door or an obstacle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub id: String,
    /// Polygon vertices in authored order.
    pub points: Vec<Vec3>,
    pub color: LinearColor,
    /// Distance at which the boundary becomes visible to the player.
    pub display_distance: f32,
    /// Wall faces inward (exclusion zone).
    pub reverse: bool,
    pub boundary_more_visible: bool,
    /// Raise an alert when the player approaches the limit.
    pub alert_limit: bool,
    pub is_main_boundary: bool,
    pub visible: bool,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            id: String::new(),
            points: Vec::new(),
            color: LinearColor::default(),
            display_distance: DEFAULT_DISPLAY_DISTANCE,
            reverse: DEFAULT_REVERSE,
            boundary_more_visible: DEFAULT_BOUNDARY_MORE_VISIBLE,
            alert_limit: DEFAULT_ALERT_LIMIT,
            is_main_boundary: DEFAULT_MAIN_BOUNDARY,
            visible: DEFAULT_VISIBLE,
        }
    }
}

impl Boundary {
    /// True when the boundary has enough points to enclose an area.
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
    }

    /// Mean of the vertices, or `None` for an empty boundary.
    pub fn centroid(&self) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Vec3 = self.points.iter().copied().sum();
        Some(sum / self.points.len() as f32)
    }

    /// Length of the closed outline in centimeters.
    pub fn perimeter(&self) -> f32 {
        match self.points.len() {
            0 | 1 => 0.0,
            n => (0..n)
                .map(|i| self.points[i].distance(self.points[(i + 1) % n]))
                .sum(),
        }
    }
}

/// Full play-space configuration for one physical location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialConfig {
    pub id: String,
    pub name: String,
    /// Free-text area description, e.g. "58.89 sqm {7.5x5.5}".
    pub area_value: String,
    /// Free-text rectangle dimensions, e.g. "7.5x5.5".
    pub max_rect: String,
    pub group_name: String,
    pub max_player: u32,
    pub multiplier: f32,
    /// Orthographic capture reference, e.g. "Hostel-BedRooms-Small_6".
    pub ortho_key: String,
    pub sync_position: Vec3,
    pub sync_rotation: Rotator,
    /// Main boundary and sub-zones in authored order. The order is
    /// load-bearing for rendering priority.
    pub boundaries: Vec<Boundary>,
}

impl SpatialConfig {
    /// First boundary flagged as main, in stored order.
    ///
    /// Several boundaries may carry the flag; the earliest one wins.
    pub fn main_boundary(&self) -> Option<&Boundary> {
        self.boundaries.iter().find(|b| b.is_main_boundary)
    }

    /// Every non-main boundary in stored order, as an owned copy.
    pub fn sub_boundaries(&self) -> Vec<Boundary> {
        self.boundaries
            .iter()
            .filter(|b| !b.is_main_boundary)
            .cloned()
            .collect()
    }

    /// Look a boundary up by id; the first match wins on duplicates.
    pub fn boundary(&self, id: &str) -> Option<&Boundary> {
        self.boundaries.iter().find(|b| b.id == id)
    }
}
