//! Sprite atlas lookup, animation clips and frame drawing.
//!
//! The sheet is a stateless lookup table: animation playback state
//! (elapsed time) belongs to the entity driving it, not to this type.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use macroquad::prelude::*;

use crate::error::AssetLoadError;
use crate::loader::json_loader::decode_atlas;

/// A named animation clip over atlas frames.
#[derive(Debug, Clone)]
pub struct Animation {
    pub frames: Vec<String>,
    pub frame_rate: f32, // frames per second
    pub repeat: bool,    // loop vs clamp to the last frame
}

struct Atlas {
    frames: HashMap<String, Rect>,
    texture: Texture2D,
}

/// A texture atlas plus registered animation clips.
#[derive(Default)]
pub struct SpriteSheet {
    atlas: Option<Atlas>,
    animations: HashMap<String, Animation>,
}

impl SpriteSheet {
    /// An empty sheet with no atlas bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once an atlas has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.atlas.is_some()
    }

    /// Load the atlas JSON and bind the shared bitmap.
    ///
    /// Either failure names the offending path. Replaces a previously
    /// loaded atlas; registered animations survive a reload.
    pub async fn load_atlas(
        &mut self,
        atlas_path: &Path,
        image_path: &Path,
    ) -> Result<(), AssetLoadError> {
        let json = std::fs::read_to_string(atlas_path).map_err(|source| AssetLoadError::Io {
            path: atlas_path.to_path_buf(),
            source,
        })?;
        let frames = decode_atlas(&json).map_err(|source| AssetLoadError::Json {
            path: atlas_path.to_path_buf(),
            source,
        })?;

        let texture = load_texture(&image_path.to_string_lossy())
            .await
            .map_err(|source| AssetLoadError::Texture {
                path: PathBuf::from(image_path),
                source,
            })?;
        texture.set_filter(FilterMode::Nearest);

        self.atlas = Some(Atlas { frames, texture });
        Ok(())
    }

    /// Register a clip over frames `"{prefix}.{index:03}"` for
    /// `start..=end`. Registering an existing name replaces the old clip.
    pub fn add_animation(
        &mut self,
        name: &str,
        frame_prefix: &str,
        start: u32,
        end: u32,
        frame_rate: f32,
        repeat: bool,
    ) {
        let frames = (start..=end)
            .map(|i| format!("{frame_prefix}.{i:03}"))
            .collect();
        self.animations.insert(
            name.to_owned(),
            Animation {
                frames,
                frame_rate,
                repeat,
            },
        );
    }

    /// Registered clip by name.
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// Frame name of a clip at an elapsed time in seconds.
    ///
    /// Looping clips wrap modulo the clip duration; non-looping clips clamp
    /// to the last frame. Unknown clips return `None`.
    pub fn animation_frame(&self, name: &str, elapsed_secs: f32) -> Option<&str> {
        let clip = self.animations.get(name)?;
        if clip.frames.is_empty() {
            return None;
        }
        if clip.frame_rate <= 0.0 {
            return Some(&clip.frames[0]);
        }

        let duration = clip.frames.len() as f32 / clip.frame_rate;
        let t = if clip.repeat {
            elapsed_secs.rem_euclid(duration)
        } else {
            elapsed_secs.clamp(0.0, duration)
        };
        let idx = ((t * clip.frame_rate).floor() as usize).min(clip.frames.len() - 1);
        Some(&clip.frames[idx])
    }

    /// Size of a frame, `None` if the atlas is unloaded or the frame is
    /// unknown.
    pub fn frame_size(&self, frame_name: &str) -> Option<Vec2> {
        let rect = self.atlas.as_ref()?.frames.get(frame_name)?;
        Some(vec2(rect.w, rect.h))
    }

    /// Draw one frame at a world position, optionally mirrored about its
    /// own width.
    ///
    /// A missing frame or unbound atlas logs a diagnostic and draws
    /// nothing; one bad frame name must not take down the render loop.
    pub fn render_frame(&self, frame_name: &str, x: f32, y: f32, flip_x: bool) {
        let Some(atlas) = &self.atlas else {
            warn!("render_frame: no atlas loaded, skipping '{}'", frame_name);
            return;
        };
        let Some(src) = atlas.frames.get(frame_name) else {
            warn!("render_frame: unknown frame '{}'", frame_name);
            return;
        };

        draw_texture_ex(
            &atlas.texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(src.w, src.h)),
                source: Some(*src),
                flip_x,
                ..Default::default()
            },
        );
    }
}
