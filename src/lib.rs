#![warn(missing_docs)]

//! Tile-grid rendering, sprite-atlas animation and AABB tile collision for
//! Macroquad.
//!
//! Three components compose bottom-up:
//!
//! - [`Tilemap`] decodes Tiled JSON maps (including the bit-packed tile
//!   flip flags), answers tile collision queries and draws viewport-culled
//!   layers.
//! - [`SpriteSheet`] holds a packed atlas plus named [`Animation`] clips and
//!   resolves frames from elapsed time.
//! - [`collision`] resolves a moving [`Aabb`] against the tile grid, one
//!   axis at a time.
//!
//! Loading is async (textures fan out concurrently); every per-frame call
//! is synchronous and safe to issue before loading finishes.

pub mod collision;
mod cull;
mod error;
mod gid;
mod loader {
    pub mod json_loader;
}
mod map;
mod sprite;
mod tilemap;

pub use collision::{aabb_overlap, check_tilemap_collision, resolve_collision};
pub use collision::{Aabb, Resolved, TileCollider};
pub use cull::{visible_tile_rect, TileRect};
pub use error::{AssetLoadError, AssetLoadErrors, MapFormatError};
pub use gid::{Gid, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use map::{MapObject, ObjectLayer, Properties, PropertyValue, TileLayer, Tileset};
pub use sprite::{Animation, SpriteSheet};
pub use tilemap::Tilemap;
