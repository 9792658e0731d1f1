//! Spatial document decoding.
//!
//! Every authored field is read as a [`Field`] (missing, mistyped or present)
//! and then resolved to its value or a per-field fallback. Only an unreadable
//! file or a non-object document fails the load; every other defect comes
//! back as a [`DecodeWarning`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use fnv::FnvHashSet;
use glam::Vec3;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::{
    default_boundary_rgb, DEFAULT_ALERT_LIMIT, DEFAULT_BOUNDARY_MORE_VISIBLE,
    DEFAULT_DISPLAY_DISTANCE, DEFAULT_MAIN_BOUNDARY, DEFAULT_REVERSE, DEFAULT_VISIBLE,
};
use crate::error::{DecodeWarning, GeometryField, LoadError, Result};
use crate::spatial::{Boundary, LinearColor, SpatialConfig};
use crate::transform::{self, Rotator};

/// A successfully decoded snapshot and the defects tolerated on the way.
#[derive(Clone, Debug, Default)]
pub struct Decoded {
    pub config: SpatialConfig,
    pub warnings: Vec<DecodeWarning>,
}

/// Read and decode the spatial document at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Decoded> {
    let path = path.as_ref();
    log::debug!("spatial path: {}", path.display());

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("spatial config not found at: {}", path.display());
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            log::error!("failed to read {}: {}", path.display(), source);
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    decode_str(&text).map_err(|e| {
        log::error!("failed to parse {}", path.display());
        e.with_path(path.to_path_buf())
    })
}

/// Decode a spatial document already held in memory.
pub fn decode_str(text: &str) -> Result<Decoded> {
    // Windows authoring tools may prepend a byte-order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let root: Value = serde_json::from_str(text)
        .map_err(|source| LoadError::ParseFailed { path: None, source })?;
    decode_value(root)
}

/// Decode an already parsed JSON document.
pub fn decode_value(root: Value) -> Result<Decoded> {
    if !root.is_object() {
        return Err(LoadError::NotAnObject { path: None });
    }
    let raw: RawSpatial = serde_json::from_value(root)
        .map_err(|source| LoadError::ParseFailed { path: None, source })?;

    let mut decoder = Decoder::default();
    let config = decoder.spatial(raw);
    decoder.validate(&config);

    log::info!(
        "spatial loaded: {} ({}) - {} boundaries",
        config.name,
        config.area_value,
        config.boundaries.len()
    );
    log::debug!("  sync pos: {}", config.sync_position);
    log::debug!("  sync rot: {}", config.sync_rotation);
    for warning in &decoder.warnings {
        log::warn!("spatial config: {warning}");
    }

    Ok(Decoded {
        config,
        warnings: decoder.warnings,
    })
}

/// One authored field, before fallbacks are applied.
#[derive(Clone, Debug, PartialEq)]
enum Field<T> {
    Missing,
    Invalid,
    Present(T),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Field::Missing);
        }
        Ok(serde_json::from_value(value)
            .map(Field::Present)
            .unwrap_or(Field::Invalid))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSpatial {
    #[serde(rename = "ID")]
    id: Field<String>,
    #[serde(rename = "Name")]
    name: Field<String>,
    #[serde(rename = "AreaValue")]
    area_value: Field<String>,
    #[serde(rename = "MaxRect")]
    max_rect: Field<String>,
    #[serde(rename = "GroupName")]
    group_name: Field<String>,
    #[serde(rename = "MaxPlayer")]
    max_player: Field<f64>,
    #[serde(rename = "Multiplier")]
    multiplier: Field<f64>,
    #[serde(rename = "OrthoKey")]
    ortho_key: Field<String>,
    #[serde(rename = "SyncPos")]
    sync_pos: Field<RawVector>,
    // authored key is misspelled; keep it as-is
    #[serde(rename = "SyncQuaterion")]
    sync_quaternion: Field<RawQuaternion>,
    #[serde(rename = "Boundaries")]
    boundaries: Field<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBoundary {
    #[serde(rename = "ID")]
    id: Field<String>,
    #[serde(rename = "DisplayDistance")]
    display_distance: Field<f64>,
    #[serde(rename = "Reverse")]
    reverse: Field<bool>,
    #[serde(rename = "BoundaryMoreVisible")]
    boundary_more_visible: Field<bool>,
    #[serde(rename = "AlertLimit")]
    alert_limit: Field<bool>,
    #[serde(rename = "MainBoundary")]
    main_boundary: Field<bool>,
    #[serde(rename = "Visible")]
    visible: Field<bool>,
    #[serde(rename = "BoundaryColor")]
    boundary_color: Field<RawVector>,
    #[serde(rename = "Points")]
    points: Field<Vec<Value>>,
}

/// `{x, y, z}` object. Each component falls back to zero on its own.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct RawVector {
    x: Field<f64>,
    y: Field<f64>,
    z: Field<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct RawQuaternion {
    x: Field<f64>,
    y: Field<f64>,
    z: Field<f64>,
    w: Field<f64>,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Missing => Field::Missing,
            Field::Invalid => Field::Invalid,
            Field::Present(value) => Field::Present(f(value)),
        }
    }
}

#[derive(Default)]
struct Decoder {
    warnings: Vec<DecodeWarning>,
}

impl Decoder {
    /// Authored value, or `default` when missing or mistyped.
    fn take<T>(&mut self, field: Field<T>, scope: &str, key: &str, default: T) -> T {
        match field {
            Field::Present(value) => value,
            Field::Missing => default,
            Field::Invalid => {
                self.warnings.push(DecodeWarning::InvalidField {
                    field: format!("{scope}{key}"),
                });
                default
            }
        }
    }

    fn spatial(&mut self, raw: RawSpatial) -> SpatialConfig {
        let max_player = self.take(raw.max_player, "", "MaxPlayer", 0.0);
        let max_player = if max_player < 0.0 {
            self.warnings
                .push(DecodeWarning::NegativeMaxPlayer { value: max_player });
            0
        } else if max_player > u32::MAX as f64 {
            self.warnings
                .push(DecodeWarning::MaxPlayerTooLarge { value: max_player });
            u32::MAX
        } else {
            // truncates toward zero
            max_player as u32
        };

        let sync_position = match self.take(raw.sync_pos.map(Some), "", "SyncPos", None) {
            Some(v) => self.sync_position(v),
            None => Vec3::ZERO,
        };
        let sync_rotation =
            match self.take(raw.sync_quaternion.map(Some), "", "SyncQuaterion", None) {
                Some(q) => self.sync_rotation(q),
                None => Rotator::IDENTITY,
            };

        let boundaries = self
            .take(raw.boundaries, "", "Boundaries", Vec::new())
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| self.boundary(index, value))
            .collect();

        SpatialConfig {
            id: self.take(raw.id, "", "ID", String::new()),
            name: self.take(raw.name, "", "Name", String::new()),
            area_value: self.take(raw.area_value, "", "AreaValue", String::new()),
            max_rect: self.take(raw.max_rect, "", "MaxRect", String::new()),
            group_name: self.take(raw.group_name, "", "GroupName", String::new()),
            max_player,
            multiplier: self.take(raw.multiplier, "", "Multiplier", 0.0) as f32,
            ortho_key: self.take(raw.ortho_key, "", "OrthoKey", String::new()),
            sync_position,
            sync_rotation,
            boundaries,
        }
    }

    /// Source-convention vector; `scope` names the enclosing object.
    fn vector(&mut self, raw: RawVector, scope: &str) -> Vec3 {
        Vec3::new(
            self.take(raw.x, scope, "x", 0.0) as f32,
            self.take(raw.y, scope, "y", 0.0) as f32,
            self.take(raw.z, scope, "z", 0.0) as f32,
        )
    }

    fn sync_position(&mut self, v: RawVector) -> Vec3 {
        let source = self.vector(v, "SyncPos.");
        let p = transform::position(source.x, source.y, source.z);
        if p.is_finite() {
            p
        } else {
            self.warnings.push(DecodeWarning::MalformedGeometry {
                field: GeometryField::SyncPosition,
            });
            Vec3::ZERO
        }
    }

    fn sync_rotation(&mut self, q: RawQuaternion) -> Rotator {
        let scope = "SyncQuaterion.";
        let x = self.take(q.x, scope, "x", 0.0) as f32;
        let y = self.take(q.y, scope, "y", 0.0) as f32;
        let z = self.take(q.z, scope, "z", 0.0) as f32;
        let w = self.take(q.w, scope, "w", 0.0) as f32;
        if ![x, y, z, w].iter().all(|c| c.is_finite()) {
            self.warnings.push(DecodeWarning::MalformedGeometry {
                field: GeometryField::SyncRotation,
            });
            return Rotator::IDENTITY;
        }
        if x == 0.0 && y == 0.0 && z == 0.0 && w == 0.0 {
            self.warnings.push(DecodeWarning::DegenerateSyncRotation);
            return Rotator::IDENTITY;
        }
        transform::orientation(x, y, z, w)
    }

    fn boundary(&mut self, index: usize, value: Value) -> Option<Boundary> {
        if !value.is_object() {
            self.warnings.push(DecodeWarning::SkippedBoundary { index });
            return None;
        }
        let raw: RawBoundary = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("boundary #{index} rejected: {e}");
                self.warnings.push(DecodeWarning::SkippedBoundary { index });
                return None;
            }
        };
        let scope = format!("Boundaries[{index}].");

        let id = self.take(raw.id, &scope, "ID", String::new());
        let display_distance = self.take(
            raw.display_distance,
            &scope,
            "DisplayDistance",
            DEFAULT_DISPLAY_DISTANCE as f64,
        ) as f32;
        let display_distance = if display_distance < 0.0 {
            self.warnings.push(DecodeWarning::NegativeDisplayDistance {
                id: id.clone(),
                value: display_distance,
            });
            0.0
        } else {
            display_distance
        };

        let rgb = match self.take(raw.boundary_color.map(Some), &scope, "BoundaryColor", None) {
            Some(v) => self.vector(v, &format!("{scope}BoundaryColor.")),
            None => default_boundary_rgb(),
        };
        let color = if rgb.is_finite() {
            LinearColor::opaque(rgb)
        } else {
            self.warnings.push(DecodeWarning::InvalidField {
                field: format!("{scope}BoundaryColor"),
            });
            LinearColor::default()
        };

        let points = self
            .take(raw.points, &scope, "Points", Vec::new())
            .into_iter()
            .enumerate()
            .filter_map(|(point, value)| self.point(index, point, value))
            .collect();

        let boundary = Boundary {
            id,
            points,
            color,
            display_distance,
            reverse: self.take(raw.reverse, &scope, "Reverse", DEFAULT_REVERSE),
            boundary_more_visible: self.take(
                raw.boundary_more_visible,
                &scope,
                "BoundaryMoreVisible",
                DEFAULT_BOUNDARY_MORE_VISIBLE,
            ),
            alert_limit: self.take(raw.alert_limit, &scope, "AlertLimit", DEFAULT_ALERT_LIMIT),
            is_main_boundary: self.take(
                raw.main_boundary,
                &scope,
                "MainBoundary",
                DEFAULT_MAIN_BOUNDARY,
            ),
            visible: self.take(raw.visible, &scope, "Visible", DEFAULT_VISIBLE),
        };

        log::debug!(
            "  boundary [{}] - {} points | main={} | visible={}",
            boundary.id,
            boundary.points.len(),
            boundary.is_main_boundary,
            boundary.visible
        );
        Some(boundary)
    }

    fn point(&mut self, boundary: usize, index: usize, value: Value) -> Option<Vec3> {
        if !value.is_object() {
            self.warnings
                .push(DecodeWarning::SkippedPoint { boundary, index });
            return None;
        }
        let Ok(raw) = serde_json::from_value::<RawVector>(value) else {
            self.warnings
                .push(DecodeWarning::SkippedPoint { boundary, index });
            return None;
        };
        let source = self.vector(raw, &format!("Boundaries[{boundary}].Points[{index}]."));
        let p = transform::position(source.x, source.y, source.z);
        if p.is_finite() {
            Some(p)
        } else {
            self.warnings.push(DecodeWarning::MalformedGeometry {
                field: GeometryField::Point { boundary, index },
            });
            None
        }
    }

    /// Structural checks on the finished snapshot. These only warn.
    fn validate(&mut self, config: &SpatialConfig) {
        let mut seen = FnvHashSet::default();
        let mut reported = FnvHashSet::default();
        for b in &config.boundaries {
            if !seen.insert(b.id.as_str()) && reported.insert(b.id.as_str()) {
                self.warnings
                    .push(DecodeWarning::DuplicateBoundaryId { id: b.id.clone() });
            }
        }

        let mut mains = config.boundaries.iter().filter(|b| b.is_main_boundary);
        if let Some(chosen) = mains.next() {
            let ignored: Vec<String> = mains.map(|b| b.id.clone()).collect();
            if !ignored.is_empty() {
                self.warnings.push(DecodeWarning::MultipleMainBoundaries {
                    chosen: chosen.id.clone(),
                    ignored,
                });
            }
        }

        for b in config.boundaries.iter().filter(|b| !b.is_polygon()) {
            self.warnings.push(DecodeWarning::DegeneratePolygon {
                id: b.id.clone(),
                points: b.points.len(),
            });
        }
    }
}
