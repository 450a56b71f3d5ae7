//! Decoded, format-agnostic map model.
//!
//! Everything here is built once by the loader and read-only afterwards,
//! except single-cell tile placement via [`crate::Tilemap::set_tile`].

use std::collections::HashMap;

use macroquad::prelude::*;

/// A typed custom property value from the map file.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    I64(i64),       // Tiled "int" / "object"
    F32(f32),
    String(String), // "string" / "file" / "color" / "class"
}

/// Custom key/value properties attached to maps, layers, tilesets, tiles
/// and objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties(HashMap<String, PropertyValue>);

impl Properties {
    /// Empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, name: String, value: PropertyValue) {
        self.0.insert(name, value);
    }

    /// Raw lookup.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    /// Boolean property, `None` if absent or of another type.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(PropertyValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Integer property, `None` if absent or of another type.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(PropertyValue::I64(v)) => Some(*v),
            _ => None,
        }
    }

    /// Float property, `None` if absent or of another type.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        match self.0.get(name) {
            Some(PropertyValue::F32(v)) => Some(*v),
            _ => None,
        }
    }

    /// String property, `None` if absent or of another type.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(PropertyValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no properties are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One tile layer: a `width * height` row-major grid of raw GIDs.
#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>, // raw GIDs including flip flags, 0 = empty
    pub visible: bool,
}

impl TileLayer {
    /// Raw GID at a tile coordinate, `None` when out of bounds.
    pub fn gid_at(&self, tile_x: i32, tile_y: i32) -> Option<u32> {
        if tile_x < 0 || tile_y < 0 || tile_x as u32 >= self.width || tile_y as u32 >= self.height
        {
            return None;
        }
        let idx = tile_y as usize * self.width as usize + tile_x as usize;
        self.data.get(idx).copied()
    }
}

/// A placed object on an object layer (spawn points, triggers, pickups).
#[derive(Debug, Clone)]
pub struct MapObject {
    pub name: String, // as authored, may be empty
    pub x: f32,
    pub y: f32,
    pub properties: Properties,
}

/// One object layer.
#[derive(Debug, Clone)]
pub struct ObjectLayer {
    pub name: String,
    pub objects: Vec<MapObject>, // file order
}

/// One tileset: a regular grid of same-size tiles inside a single image,
/// owning the GID range `first_gid .. first_gid + tilecount`.
#[derive(Debug)]
pub struct Tileset {
    pub first_gid: u32,
    pub tilecount: u32,
    pub columns: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    pub margin: u32,  // 0 if not used
    pub spacing: u32, // 0 if not used
    pub image: String, // relative to the map file
    pub tile_properties: HashMap<u32, Properties>, // keyed by local tile id
    pub texture: Option<Texture2D>, // None until load_tilesets binds it
}

impl Tileset {
    /// Source rectangle of a local tile id, honoring margin and spacing.
    pub fn source_rect(&self, local_id: u32) -> Rect {
        let col = local_id % self.columns;
        let row = local_id / self.columns;
        let x = self.margin + col * (self.tile_w + self.spacing);
        let y = self.margin + row * (self.tile_h + self.spacing);
        Rect::new(x as f32, y as f32, self.tile_w as f32, self.tile_h as f32)
    }
}

/// The decoded map: grid metadata plus ordered layers and tilesets.
#[derive(Debug, Default)]
pub struct MapData {
    pub width: u32,  // in tiles
    pub height: u32, // in tiles
    pub tile_w: u32, // in pixels
    pub tile_h: u32, // in pixels
    pub tile_layers: Vec<TileLayer>, // draw order: array order
    pub object_layers: Vec<ObjectLayer>,
    pub tilesets: Vec<Tileset>, // sorted by first_gid
}

impl MapData {
    /// Tile layer by name.
    pub fn tile_layer(&self, name: &str) -> Option<&TileLayer> {
        self.tile_layers.iter().find(|l| l.name == name)
    }

    /// Object layer by name.
    pub fn object_layer(&self, name: &str) -> Option<&ObjectLayer> {
        self.object_layers.iter().find(|l| l.name == name)
    }
}
