//! The tile-grid renderer: map loading, culled drawing and tile collision
//! queries.

use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use futures::future::join_all;
use macroquad::prelude::*;

use crate::collision::TileCollider;
use crate::cull::visible_tile_rect;
use crate::error::{AssetLoadError, AssetLoadErrors, MapFormatError};
use crate::gid::Gid;
use crate::loader::json_loader::decode_map;
use crate::map::{MapData, Properties, PropertyValue, Tileset};

/// Owns one decoded map plus its tileset bitmaps and the derived collision
/// GID set.
///
/// Constructed empty; until [`Tilemap::load_map`] succeeds every query
/// returns a zeroed or permissive default and [`Tilemap::render`] is a
/// no-op, so startup call-ordering races cannot crash the frame loop.
#[derive(Default)]
pub struct Tilemap {
    map: Option<MapData>,
    gid_lut: Vec<u16>,        // GID -> tileset index, u16::MAX for unowned gids
    colliding: HashSet<u32>,  // actual GIDs (flags stripped) with collides=true
}

impl Tilemap {
    /// An empty renderer with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a map has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.map.is_some()
    }

    /// Parse a Tiled JSON map and derive the collision set and GID lookup
    /// table.
    ///
    /// Replaces any previously loaded map; textures bound for the old map
    /// are dropped with it, so a superseded load cannot leak stale bindings
    /// into the new one.
    pub fn load_map(&mut self, json: &str) -> Result<(), MapFormatError> {
        let map = decode_map(json)?;

        let max_gid = map
            .tilesets
            .iter()
            .map(|t| t.first_gid + t.tilecount)
            .max()
            .unwrap_or(1);
        let mut gid_lut = vec![u16::MAX; max_gid as usize];
        let mut colliding = HashSet::new();

        for (i, ts) in map.tilesets.iter().enumerate() {
            for gid in ts.first_gid..ts.first_gid + ts.tilecount {
                gid_lut[gid as usize] = i as u16;
            }
            for (id, props) in &ts.tile_properties {
                if props.get_bool("collides") == Some(true) {
                    colliding.insert(ts.first_gid + id);
                }
            }
        }

        self.map = Some(map);
        self.gid_lut = gid_lut;
        self.colliding = colliding;
        Ok(())
    }

    /// Bind one bitmap per tileset, loading all images concurrently.
    ///
    /// Failures are collected per path; tilesets whose image did load stay
    /// bound, so a single bad path does not black out the whole map.
    pub async fn load_tilesets(&mut self, base_dir: &Path) -> Result<(), AssetLoadErrors> {
        let Some(map) = &mut self.map else {
            return Ok(());
        };

        let loads = map.tilesets.iter().map(|ts| {
            let path = base_dir.join(&ts.image);
            async move {
                let res = load_texture(&path.to_string_lossy()).await;
                (path, res)
            }
        });
        let results = join_all(loads).await;

        let mut errors = Vec::new();
        for (i, (path, res)) in results.into_iter().enumerate() {
            match res {
                Ok(tex) => {
                    // Pixel art: no smoothing.
                    tex.set_filter(FilterMode::Nearest);
                    map.tilesets[i].texture = Some(tex);
                }
                Err(source) => errors.push(AssetLoadError::Texture { path, source }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AssetLoadErrors(errors))
        }
    }

    /// Map size in tiles, `(0, 0)` before a map is loaded.
    pub fn map_size(&self) -> (u32, u32) {
        self.map
            .as_ref()
            .map(|m| (m.width, m.height))
            .unwrap_or((0, 0))
    }

    /// Tile size in pixels, zero before a map is loaded.
    pub fn tile_size(&self) -> Vec2 {
        self.map
            .as_ref()
            .map(|m| vec2(m.tile_w as f32, m.tile_h as f32))
            .unwrap_or(Vec2::ZERO)
    }

    /// Tileset owning a GID plus the local tile id inside it.
    pub fn tileset_for(&self, gid: Gid) -> Option<(&Tileset, u32)> {
        let actual = gid.actual() as usize;
        if actual >= self.gid_lut.len() {
            return None;
        }
        let idx = self.gid_lut[actual];
        if idx == u16::MAX {
            return None;
        }
        let ts = &self.map.as_ref()?.tilesets[idx as usize];
        Some((ts, gid.actual() - ts.first_gid))
    }

    /// Custom properties of a tile, looked up by masked GID.
    pub fn tile_properties(&self, gid: u32) -> Option<&Properties> {
        let (ts, local) = self.tileset_for(Gid(gid))?;
        ts.tile_properties.get(&local)
    }

    /// Whether a GID (flags ignored) belongs to the collision set.
    pub fn is_gid_colliding(&self, gid: u32) -> bool {
        self.colliding.contains(&Gid(gid).actual())
    }

    /// Whether the tile at a grid coordinate blocks movement.
    ///
    /// Out-of-bounds coordinates are solid (the map edge is a wall); an
    /// unloaded map or unknown layer is permissive and never blocks.
    pub fn is_tile_colliding(&self, tile_x: i32, tile_y: i32, layer_name: &str) -> bool {
        let Some(map) = &self.map else {
            return false;
        };
        if tile_x < 0 || tile_y < 0 || tile_x as u32 >= map.width || tile_y as u32 >= map.height {
            return true;
        }
        let Some(layer) = map.tile_layer(layer_name) else {
            return false;
        };
        match layer.gid_at(tile_x, tile_y) {
            Some(raw) => self.colliding.contains(&Gid(raw).actual()),
            None => true,
        }
    }

    /// Overwrite one cell of a tile layer (gameplay placing or removing a
    /// tile). Returns false when the layer or coordinate does not exist.
    /// Collision queries read live layer data, so no rebuild is needed.
    pub fn set_tile(&mut self, layer_name: &str, tile_x: i32, tile_y: i32, gid: u32) -> bool {
        let Some(map) = &mut self.map else {
            return false;
        };
        let Some(layer) = map.tile_layers.iter_mut().find(|l| l.name == layer_name) else {
            return false;
        };
        if tile_x < 0 || tile_y < 0 || tile_x as u32 >= layer.width || tile_y as u32 >= layer.height
        {
            return false;
        }
        let idx = tile_y as usize * layer.width as usize + tile_x as usize;
        layer.data[idx] = gid;
        true
    }

    /// Position of the first object with a matching name on an object
    /// layer.
    pub fn find_object(&self, layer_name: &str, name: &str) -> Option<Vec2> {
        let layer = self.map.as_ref()?.object_layer(layer_name)?;
        layer
            .objects
            .iter()
            .find(|o| o.name == name)
            .map(|o| vec2(o.x, o.y))
    }

    /// Position of the first object whose property `key` equals `value`.
    pub fn find_object_by_property(
        &self,
        layer_name: &str,
        key: &str,
        value: &PropertyValue,
    ) -> Option<Vec2> {
        let layer = self.map.as_ref()?.object_layer(layer_name)?;
        layer
            .objects
            .iter()
            .find(|o| o.properties.get(key) == Some(value))
            .map(|o| vec2(o.x, o.y))
    }

    /// Draw the visible part of one tile layer in world coordinates.
    ///
    /// `camera` is the world position of the viewport's top-left corner.
    /// Unknown or hidden layers log a diagnostic and draw nothing; tilesets
    /// whose bitmap is not bound yet are skipped. Iteration is limited to
    /// the culled tile rectangle, so cost tracks viewport size rather than
    /// map size.
    pub fn render(&self, layer_name: &str, camera: Vec2, viewport: Vec2) {
        let Some(map) = &self.map else {
            return;
        };
        let Some(layer) = map.tile_layer(layer_name) else {
            warn!("render: no tile layer named '{}'", layer_name);
            return;
        };
        if !layer.visible {
            warn!("render: layer '{}' is hidden", layer_name);
            return;
        }

        let tile = vec2(map.tile_w as f32, map.tile_h as f32);
        let Some(rect) = visible_tile_rect(camera, viewport, tile, map.width, map.height) else {
            return;
        };

        for ty in rect.y0..=rect.y1 {
            for tx in rect.x0..=rect.x1 {
                let idx = ty as usize * map.width as usize + tx as usize;
                let gid = Gid(layer.data[idx]);
                if gid.is_empty() {
                    continue;
                }
                let Some((ts, local)) = self.tileset_for(gid) else {
                    continue;
                };
                let Some(tex) = &ts.texture else {
                    continue;
                };

                let mut params = flip_params(gid);
                params.dest_size = Some(tile);
                params.source = Some(ts.source_rect(local));
                draw_texture_ex(tex, tx as f32 * tile.x, ty as f32 * tile.y, WHITE, params);
            }
        }
    }
}

/// Render-time transform for a GID's flip flags.
///
/// The diagonal flag rotates a quarter turn counter-clockwise about the
/// tile center, then the horizontal/vertical flips apply. macroquad composes
/// source-rect flips before the quad rotation, which is that exact order;
/// swapping it renders flipped tiles mirrored.
fn flip_params(gid: Gid) -> DrawTextureParams {
    DrawTextureParams {
        rotation: if gid.flip_d() { -FRAC_PI_2 } else { 0.0 },
        flip_x: gid.flip_h(),
        flip_y: gid.flip_v(),
        ..Default::default()
    }
}

impl TileCollider for Tilemap {
    fn tile_size(&self) -> Vec2 {
        Tilemap::tile_size(self)
    }

    fn is_tile_colliding(&self, tile_x: i32, tile_y: i32, layer_name: &str) -> bool {
        Tilemap::is_tile_colliding(self, tile_x, tile_y, layer_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gid::{FLIP_D, FLIP_H, FLIP_V};

    #[test]
    fn flip_params_match_tiled_conventions() {
        let plain = flip_params(Gid(7));
        assert_eq!(plain.rotation, 0.0);
        assert!(!plain.flip_x && !plain.flip_y);

        let h = flip_params(Gid(7 | FLIP_H));
        assert!(h.flip_x && !h.flip_y);
        assert_eq!(h.rotation, 0.0);

        let dvh = flip_params(Gid(7 | FLIP_D | FLIP_V | FLIP_H));
        assert_eq!(dvh.rotation, -FRAC_PI_2);
        assert!(dvh.flip_x && dvh.flip_y);
    }
}
