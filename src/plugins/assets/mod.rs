//! Asset registries: named sprite sheets and sounds.
//!
//! Decoding belongs to the host through [`ResourceLoader`]; the registries only keep the
//! handles it returns, keyed by name. The first registration of a name wins and a failed
//! load leaves the name unresolved, so later lookups simply find nothing.

pub mod audio;

use std::collections::HashMap;

use bevy::math::{IRect, IVec2};
use bevy::prelude::*;

use crate::common::geometry::rect_at;

/// Opaque texture id issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque sound id issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// A decoded texture and its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub handle: TextureHandle,
    pub width: i32,
    pub height: i32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("texture not found: {0}")]
    TextureNotFound(String),

    #[error("sound not found: {0}")]
    SoundNotFound(String),

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Host-side asset decoding.
pub trait ResourceLoader {
    /// Load a texture, keying out `transparent` pixels.
    fn load_texture(&mut self, path: &str, transparent: Color) -> Result<TextureInfo, LoadError>;

    fn load_sound(&mut self, path: &str) -> Result<SoundHandle, LoadError>;
}

/// How to slice a texture into frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDesc {
    pub frame_width: i32,
    pub frame_height: i32,
    pub frame_count: u32,
    pub start_frame: u32,
    pub looping: bool,
    pub scale: f32,
    pub transparent: Color,
}

impl SpriteDesc {
    /// A single looping frame of the given size.
    pub fn new(frame_width: i32, frame_height: i32) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count: 1,
            start_frame: 0,
            looping: true,
            scale: 1.0,
            transparent: Color::WHITE,
        }
    }

    pub fn frames(mut self, start_frame: u32, frame_count: u32) -> Self {
        self.start_frame = start_frame;
        self.frame_count = frame_count;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// A named strip of frames on a texture. Shared by every entity that shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub texture: TextureHandle,
    pub texture_width: i32,
    pub texture_height: i32,
    pub frame_width: i32,
    pub frame_height: i32,
    pub frame_count: u32,
    pub start_frame: u32,
    pub looping: bool,
    pub scale: f32,
}

impl SpriteSheet {
    pub fn from_desc(texture: TextureInfo, desc: &SpriteDesc) -> Self {
        Self {
            texture: texture.handle,
            texture_width: texture.width,
            texture_height: texture.height,
            frame_width: desc.frame_width,
            frame_height: desc.frame_height,
            frame_count: desc.frame_count.max(1),
            start_frame: desc.start_frame,
            looping: desc.looping,
            scale: desc.scale,
        }
    }

    /// Frames per row of the texture, never zero.
    #[inline]
    pub fn columns(&self) -> i32 {
        if self.frame_width <= 0 {
            return 1;
        }
        (self.texture_width / self.frame_width).max(1)
    }

    /// Source rectangle of frame `frame` (relative to `start_frame`). Frames run along the
    /// first row of the texture.
    pub fn frame_rect(&self, frame: u32) -> IRect {
        let index = (self.start_frame + frame) as i32;
        let x = (index % self.columns()) * self.frame_width;
        rect_at(IVec2::new(x, 0), IVec2::new(self.frame_width, self.frame_height))
    }

    /// Frame size scaled by `scale`, rounded to whole units.
    #[inline]
    pub fn scaled_size(&self, scale: f32) -> IVec2 {
        IVec2::new(
            (self.frame_width as f32 * scale).round() as i32,
            (self.frame_height as f32 * scale).round() as i32,
        )
    }
}

#[derive(Resource, Debug, Default)]
pub struct SpriteRegistry {
    sheets: HashMap<String, SpriteSheet>,
}

impl SpriteRegistry {
    /// Register `sheet` under `name` unless the name is taken. Returns whether it was stored.
    pub fn insert(&mut self, name: impl Into<String>, sheet: SpriteSheet) -> bool {
        let name = name.into();
        if self.sheets.contains_key(&name) {
            debug!("sprite {name:?} already registered; keeping the first");
            return false;
        }
        self.sheets.insert(name, sheet);
        true
    }

    /// Decode `path` through the loader and register it as `name`.
    pub fn load(
        &mut self,
        loader: &mut dyn ResourceLoader,
        name: &str,
        path: &str,
        desc: SpriteDesc,
    ) -> bool {
        if self.sheets.contains_key(name) {
            return false;
        }
        match loader.load_texture(path, desc.transparent) {
            Ok(texture) => self.insert(name, SpriteSheet::from_desc(texture, &desc)),
            Err(err) => {
                warn!("sprite {name:?} not registered: {err}");
                false
            }
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&SpriteSheet> {
        self.sheets.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[derive(Resource, Debug, Default)]
pub struct SoundRegistry {
    sounds: HashMap<String, SoundHandle>,
}

impl SoundRegistry {
    pub fn insert(&mut self, name: impl Into<String>, sound: SoundHandle) -> bool {
        let name = name.into();
        if self.sounds.contains_key(&name) {
            debug!("sound {name:?} already registered; keeping the first");
            return false;
        }
        self.sounds.insert(name, sound);
        true
    }

    pub fn load(&mut self, loader: &mut dyn ResourceLoader, name: &str, path: &str) -> bool {
        if self.sounds.contains_key(name) {
            return false;
        }
        match loader.load_sound(path) {
            Ok(sound) => self.insert(name, sound),
            Err(err) => {
                warn!("sound {name:?} not registered: {err}");
                false
            }
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<SoundHandle> {
        self.sounds.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }
}

/// `(frame_count, looping)` for a registered sprite, or a single looping frame.
pub fn sprite_frames(world: &World, name: &str) -> (u32, bool) {
    world
        .get_resource::<SpriteRegistry>()
        .and_then(|r| r.get(name))
        .map_or((1, true), |s| (s.frame_count, s.looping))
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SpriteRegistry>()
        .init_resource::<SoundRegistry>();
    audio::plugin(app);
}
