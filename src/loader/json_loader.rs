//! Raw JSON decoding for Tiled maps and sprite atlases.
//!
//! The serde mirror structs stay private; callers get the owned model types
//! from [`crate::map`] or a plain frame table for atlases.

use std::collections::HashMap;

use macroquad::prelude::Rect;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::MapFormatError;
use crate::map::{MapData, MapObject, ObjectLayer, Properties, PropertyValue, TileLayer, Tileset};

#[derive(Deserialize)]
struct JsonMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<JsonLayer>,
    tilesets: Vec<JsonTileset>,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" or "objectgroup"
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

#[derive(Deserialize)]
struct JsonTileset {
    firstgid: u32,
    columns: u32,
    tilecount: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    spacing: u32,
    image: String,
    #[serde(default)]
    tiles: Vec<JsonTile>,
}

#[derive(Deserialize)]
struct JsonTile {
    id: u32,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

fn default_true() -> bool {
    true
}

fn json_property_to_value(
    prop: JsonProperty,
) -> Result<Option<(String, PropertyValue)>, MapFormatError> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => value.as_bool().map(PropertyValue::Bool),
        Some("int") | Some("object") => value.as_i64().map(PropertyValue::I64),
        Some("float") => value.as_f64().map(|n| PropertyValue::F32(n as f32)),
        Some("string") | Some("file") | Some("color") | Some("class") => {
            value.as_str().map(|s| PropertyValue::String(s.to_owned()))
        }
        Some(other) => {
            return Err(MapFormatError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        None => {
            // Untyped property: infer from the JSON value.
            if let Some(v) = value.as_bool() {
                Some(PropertyValue::Bool(v))
            } else if let Some(v) = value.as_i64() {
                Some(PropertyValue::I64(v))
            } else if let Some(v) = value.as_f64() {
                Some(PropertyValue::F32(v as f32))
            } else {
                value.as_str().map(|s| PropertyValue::String(s.to_owned()))
            }
        }
    };

    Ok(parsed.map(|value| (name, value)))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties, MapFormatError> {
    let mut out = Properties::new();
    for p in props {
        if let Some((name, value)) = json_property_to_value(p)? {
            out.insert(name, value);
        }
    }
    Ok(out)
}

/// Decode a Tiled JSON map document into the owned model.
///
/// Validates the invariants the renderer relies on: a non-empty grid with
/// non-zero tile dimensions, at least one tileset, and tile layer data of
/// exactly `width * height` entries.
pub fn decode_map(json: &str) -> Result<MapData, MapFormatError> {
    let j: JsonMap = serde_json::from_str(json)?;

    if j.width == 0 || j.height == 0 || j.tilewidth == 0 || j.tileheight == 0 {
        return Err(MapFormatError::ZeroDimensions);
    }
    if j.tilesets.is_empty() {
        return Err(MapFormatError::NoTilesets);
    }

    let expected = j.width as usize * j.height as usize;
    let mut tile_layers = Vec::new();
    let mut object_layers = Vec::new();

    for l in j.layers {
        match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => {
                if l.data.len() != expected {
                    return Err(MapFormatError::LayerSizeMismatch {
                        name: l.name,
                        len: l.data.len(),
                        expected,
                    });
                }
                tile_layers.push(TileLayer {
                    name: l.name,
                    width: j.width,
                    height: j.height,
                    data: l.data,
                    visible: l.visible,
                });
            }
            "objectgroup" => {
                let objects = l
                    .objects
                    .into_iter()
                    .map(|o| {
                        Ok(MapObject {
                            name: o.name,
                            x: o.x,
                            y: o.y,
                            properties: properties_from_json(o.properties)?,
                        })
                    })
                    .collect::<Result<Vec<_>, MapFormatError>>()?;
                object_layers.push(ObjectLayer {
                    name: l.name,
                    objects,
                });
            }
            // Image layers and groups carry nothing we render.
            _ => {}
        }
    }

    let mut tilesets = j
        .tilesets
        .into_iter()
        .map(|ts| {
            let mut tile_properties = HashMap::new();
            for tile in ts.tiles {
                let props = properties_from_json(tile.properties)?;
                if !props.is_empty() {
                    tile_properties.insert(tile.id, props);
                }
            }
            Ok(Tileset {
                first_gid: ts.firstgid,
                tilecount: ts.tilecount,
                columns: ts.columns,
                tile_w: ts.tilewidth,
                tile_h: ts.tileheight,
                margin: ts.margin,
                spacing: ts.spacing,
                image: ts.image,
                tile_properties,
                texture: None,
            })
        })
        .collect::<Result<Vec<_>, MapFormatError>>()?;

    // Sorted tilesets make the GID lookup table trivial to build.
    tilesets.sort_by_key(|t| t.first_gid);

    Ok(MapData {
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        tile_layers,
        object_layers,
        tilesets,
    })
}

#[derive(Deserialize)]
struct JsonAtlas {
    frames: HashMap<String, JsonAtlasFrame>,
}

#[derive(Deserialize)]
struct JsonAtlasFrame {
    frame: JsonFrameRect,
}

#[derive(Deserialize)]
struct JsonFrameRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Decode a sprite-atlas JSON document into a name → source-rect table.
pub fn decode_atlas(json: &str) -> Result<HashMap<String, Rect>, serde_json::Error> {
    let j: JsonAtlas = serde_json::from_str(json)?;
    Ok(j.frames
        .into_iter()
        .map(|(name, f)| {
            (
                name,
                Rect::new(f.frame.x, f.frame.y, f.frame.w, f.frame.h),
            )
        })
        .collect())
}
