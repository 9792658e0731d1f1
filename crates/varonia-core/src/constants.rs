use glam::Vec3;

// Shared conversion and decoding constants for the spatial loader.

// Units
pub const METERS_TO_CENTIMETERS: f32 = 100.0; // source meters -> target centimeters

// Rotation extraction
pub const SINGULARITY_THRESHOLD: f32 = 0.499_999_5; // gimbal pole detection on z*x - w*y

// Boundary defaults applied when a field is absent from the document
pub const DEFAULT_DISPLAY_DISTANCE: f32 = 1.5; // meters at which a wall fades in
pub const DEFAULT_REVERSE: bool = false;
pub const DEFAULT_BOUNDARY_MORE_VISIBLE: bool = false;
pub const DEFAULT_ALERT_LIMIT: bool = true;
pub const DEFAULT_MAIN_BOUNDARY: bool = true;
pub const DEFAULT_VISIBLE: bool = true;
pub const DEFAULT_BOUNDARY_RGB: [f32; 3] = [1.0, 0.0, 0.0]; // opaque red
pub const BOUNDARY_ALPHA: f32 = 1.0; // authored colors never carry alpha

// A polygon needs at least this many points to enclose an area
pub const MIN_POLYGON_POINTS: usize = 3;

#[inline]
pub fn default_boundary_rgb() -> Vec3 {
    Vec3::new(
        DEFAULT_BOUNDARY_RGB[0],
        DEFAULT_BOUNDARY_RGB[1],
        DEFAULT_BOUNDARY_RGB[2],
    )
}
