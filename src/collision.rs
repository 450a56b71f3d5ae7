//! AABB-vs-tile-grid collision detection and resolution.
//!
//! Pure functions over a [`TileCollider`] query; nothing here suspends,
//! allocates or fails. A collider that is not loaded yet reports a zero
//! tile size and no solid tiles, which makes every operation fail open:
//! a misconfigured caller moves freely instead of being walled in.

use macroquad::prelude::*;

/// Tile-grid collision queries, the seam between the resolver and the map.
///
/// Implemented by [`crate::Tilemap`]; tests supply fixture grids.
pub trait TileCollider {
    /// Tile size in pixels; zero means "nothing loaded".
    fn tile_size(&self) -> Vec2;

    /// Whether the tile at a grid coordinate blocks movement.
    fn is_tile_colliding(&self, tile_x: i32, tile_y: i32, layer_name: &str) -> bool;
}

/// An axis-aligned box in world pixels, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    /// Construct from position and size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Outcome of [`resolve_collision`]: the corrected position and the
/// velocity with blocked axes zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub position: Vec2,
    pub velocity: Vec2, // an axis is zeroed when it hit a wall
}

/// Whether a box overlaps any solid tile on the named layer.
///
/// The covered tile range uses `floor(edge / tile)` for the leading edges
/// and `floor((edge + size - 1) / tile)` for the trailing ones; the `-1`
/// keeps a box whose edge rests exactly on a tile boundary from counting
/// the next tile as overlapped.
pub fn check_tilemap_collision(map: &impl TileCollider, aabb: &Aabb, layer: &str) -> bool {
    let tile = map.tile_size();
    if tile.x <= 0.0 || tile.y <= 0.0 {
        return false;
    }

    let left = (aabb.x / tile.x).floor() as i32;
    let right = ((aabb.x + aabb.w - 1.0) / tile.x).floor() as i32;
    let top = (aabb.y / tile.y).floor() as i32;
    let bottom = ((aabb.y + aabb.h - 1.0) / tile.y).floor() as i32;

    for ty in top..=bottom {
        for tx in left..=right {
            if map.is_tile_colliding(tx, ty, layer) {
                return true;
            }
        }
    }
    false
}

/// Resolve a moving box against the tile grid, one axis at a time.
///
/// X resolves first, then Y against the already-corrected X position, so
/// diagonal motion into a wall slides along it instead of freezing at the
/// corner. A blocked axis snaps the box flush to the tile boundary in the
/// direction of travel and zeroes that axis's velocity.
pub fn resolve_collision(
    map: &impl TileCollider,
    aabb: &Aabb,
    velocity: Vec2,
    layer: &str,
) -> Resolved {
    let tile = map.tile_size();
    let mut pos = vec2(aabb.x, aabb.y);
    let mut vel = velocity;

    if vel.x != 0.0 {
        let candidate = Aabb::new(pos.x + vel.x, pos.y, aabb.w, aabb.h);
        if check_tilemap_collision(map, &candidate, layer) {
            pos.x = if vel.x > 0.0 {
                ((candidate.x + aabb.w) / tile.x).floor() * tile.x - aabb.w
            } else {
                (candidate.x / tile.x).ceil() * tile.x
            };
            vel.x = 0.0;
        } else {
            pos.x = candidate.x;
        }
    }

    if vel.y != 0.0 {
        let candidate = Aabb::new(pos.x, pos.y + vel.y, aabb.w, aabb.h);
        if check_tilemap_collision(map, &candidate, layer) {
            pos.y = if vel.y > 0.0 {
                ((candidate.y + aabb.h) / tile.y).floor() * tile.y - aabb.h
            } else {
                (candidate.y / tile.y).ceil() * tile.y
            };
            vel.y = 0.0;
        } else {
            pos.y = candidate.y;
        }
    }

    Resolved {
        position: pos,
        velocity: vel,
    }
}

/// Strict rectangle overlap; boxes that exactly touch do not collide.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x + a.w > b.x && a.x < b.x + b.w && a.y + a.h > b.y && a.y < b.y + b.h
}
