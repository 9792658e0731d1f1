//! Spatial play-space configuration for Varonia.
//!
//! Decodes the device-authored `NewSpatial.json` document, converts every
//! position and orientation from the authoring convention (right-handed,
//! Y-up, meters) to the engine convention (left-handed, Z-up, centimeters)
//! and exposes boundary queries over the resulting snapshot.
//!
//! ```no_run
//! let decoded = varonia_core::load("NewSpatial.json")?;
//! if let Some(main) = decoded.config.main_boundary() {
//!     println!("{} has {} points", main.id, main.points.len());
//! }
//! # Ok::<(), varonia_core::LoadError>(())
//! ```

pub mod constants;
pub mod error;
pub mod loader;
pub mod spatial;
pub mod transform;

pub use error::{DecodeWarning, GeometryField, LoadError};
pub use loader::{decode_str, decode_value, load, Decoded};
pub use spatial::{Boundary, LinearColor, SpatialConfig};
pub use transform::Rotator;
