use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    /// No file at the resolved path. Hosts treat this as a first run.
    #[error("spatial config not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse spatial config{}: {source}", describe(.path))]
    ParseFailed {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("spatial config{} is not a JSON object", describe(.path))]
    NotAnObject { path: Option<PathBuf> },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }

    /// True for documents that were read but could not be decoded.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            LoadError::ParseFailed { .. } | LoadError::NotAnObject { .. }
        )
    }

    pub(crate) fn with_path(self, file: PathBuf) -> Self {
        match self {
            LoadError::ParseFailed { source, .. } => LoadError::ParseFailed {
                path: Some(file),
                source,
            },
            LoadError::NotAnObject { .. } => LoadError::NotAnObject { path: Some(file) },
            other => other,
        }
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Which geometric field carried a non-finite value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryField {
    SyncPosition,
    SyncRotation,
    Point { boundary: usize, index: usize },
}

impl std::fmt::Display for GeometryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryField::SyncPosition => f.write_str("sync position"),
            GeometryField::SyncRotation => f.write_str("sync rotation"),
            GeometryField::Point { boundary, index } => {
                write!(f, "boundary #{boundary} point #{index}")
            }
        }
    }
}

/// A defect the loader tolerated while building a snapshot.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum DecodeWarning {
    #[error("field `{field}` has the wrong type, using default")]
    InvalidField { field: String },

    #[error("boundary #{index} is not an object, skipped")]
    SkippedBoundary { index: usize },

    #[error("boundary #{boundary} point #{index} is not an object, skipped")]
    SkippedPoint { boundary: usize, index: usize },

    #[error("{field} contains non-finite values, skipped")]
    MalformedGeometry { field: GeometryField },

    #[error("sync rotation quaternion is all zero, using identity")]
    DegenerateSyncRotation,

    #[error("boundary `{id}` has negative display distance {value}, clamped to 0")]
    NegativeDisplayDistance { id: String, value: f32 },

    #[error("max player count {value} is negative, clamped to 0")]
    NegativeMaxPlayer { value: f64 },

    #[error("max player count {value} does not fit, clamped to u32::MAX")]
    MaxPlayerTooLarge { value: f64 },

    #[error("boundary id `{id}` appears more than once")]
    DuplicateBoundaryId { id: String },

    #[error("boundaries {} are also flagged main, using `{chosen}`", .ignored.join(", "))]
    MultipleMainBoundaries { chosen: String, ignored: Vec<String> },

    #[error("boundary `{id}` has {points} point(s), not a polygon")]
    DegeneratePolygon { id: String, points: usize },
}
