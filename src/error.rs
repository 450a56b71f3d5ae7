//! Typed errors for map parsing and asset loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A structurally invalid Tiled map document.
///
/// These are load-time failures; per-frame lookups never produce them.
#[derive(Debug, Error)]
pub enum MapFormatError {
    /// The map text is not valid JSON or misses required fields.
    #[error("invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The map references no tilesets at all.
    #[error("map has no tilesets")]
    NoTilesets,

    /// A tile layer's data length does not match the map grid.
    #[error("layer '{name}' has {len} tiles, expected {expected}")]
    LayerSizeMismatch {
        name: String,
        len: usize,
        expected: usize, // width * height
    },

    /// Map grid or tile dimensions are zero.
    #[error("map grid or tile dimensions are zero")]
    ZeroDimensions,

    /// A property carries a type this loader does not understand.
    #[error("property '{name}' has unsupported type '{kind}'")]
    UnsupportedPropertyType { name: String, kind: String },
}

/// A single asset (JSON or image) that failed to fetch or decode.
///
/// Always names the path so the host can show a meaningful load-error screen.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// Reading the file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON of the expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The texture could not be fetched or decoded.
    #[error("failed to load texture {}: {source}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: macroquad::Error,
    },
}

impl AssetLoadError {
    /// Path of the asset that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            AssetLoadError::Io { path, .. }
            | AssetLoadError::Json { path, .. }
            | AssetLoadError::Texture { path, .. } => path,
        }
    }
}

/// Joint report for a batch of concurrent asset loads.
///
/// Tileset images load independently; one bad path does not abort the rest,
/// so the caller gets every individual failure at once.
#[derive(Debug)]
pub struct AssetLoadErrors(pub Vec<AssetLoadError>);

impl fmt::Display for AssetLoadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} asset(s) failed to load", self.0.len())?;
        for e in &self.0 {
            write!(f, "; {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AssetLoadErrors {}
