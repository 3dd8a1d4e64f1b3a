//! Render plugin: one draw pass over the simulation through a [`RenderBackend`].
//!
//! The pass never touches the simulation except for the camera, which eases toward the
//! player at the start of every frame. Draw order:
//!
//! 1. ground tiles, in insertion order
//! 2. active sprites, by layer, then `y`, then serial
//! 3. health bars over everything else

use std::cmp::Ordering;

use bevy::math::{IRect, IVec2};
use bevy::prelude::*;

use crate::common::geometry::{rect_at, round_to_grid};
use crate::common::tunables::Tunables;
use crate::plugins::assets::{SpriteRegistry, SpriteSheet, TextureHandle};
use crate::plugins::camera::{camera_position, follow_camera};
use crate::plugins::core::components::{
    Animation, EntityId, Health, HealthBar, Projectile, SimTransform, SpriteRef, Velocity,
};
use crate::plugins::level::GroundTiles;

pub const BAR_BACKGROUND: Color = Color::srgb(1.0, 0.0, 0.0);
pub const BAR_FILL: Color = Color::srgb(0.0, 1.0, 0.0);

/// Backend-agnostic 2D drawing interface. Rectangles are in screen pixels.
pub trait RenderBackend {
    /// Current drawable size in pixels.
    fn window_size(&self) -> IVec2;

    fn set_draw_color(&mut self, color: Color);

    fn fill_rect(&mut self, rect: IRect);

    fn draw_rect(&mut self, rect: IRect);

    /// Copy `src` from `texture` into `dst`, rotated by `angle` degrees about the centre
    /// of `dst` and optionally mirrored horizontally.
    fn draw_texture(&mut self, texture: TextureHandle, src: IRect, dst: IRect, angle: f64, flip: bool);
}

/// One sprite ready to draw.
struct DrawItem<'a> {
    entity: Entity,
    id: u64,
    sheet: &'a SpriteSheet,
    frame: u32,
    transform: &'a SimTransform,
}

fn draw_order(a: &DrawItem, b: &DrawItem) -> Ordering {
    a.transform
        .layer
        .cmp(&b.transform.layer)
        .then(a.transform.position.y.total_cmp(&b.transform.position.y))
        .then(a.id.cmp(&b.id))
}

/// Heading of a moving projectile in degrees, with the art pointing up at zero.
#[inline]
pub fn projectile_angle(velocity: Vec2) -> f64 {
    f64::from(velocity.y).atan2(f64::from(velocity.x)).to_degrees() - 90.0
}

/// Health bar background and fill for a bar `width` wide at `origin`.
pub fn health_bar_rects(origin: IVec2, width: i32, height: i32, health: &Health) -> (IRect, IRect) {
    let fraction = if health.max > 0 {
        health.current as f32 / health.max as f32
    } else {
        0.0
    };
    let fill = (width as f32 * fraction).round() as i32;
    (
        rect_at(origin, IVec2::new(width, height)),
        rect_at(origin, IVec2::new(fill, height)),
    )
}

fn draw_ground(world: &World, backend: &mut dyn RenderBackend, camera: Vec2, sprites: &SpriteRegistry) {
    let Some(tiles) = world.get_resource::<GroundTiles>() else {
        return;
    };
    for tile in &tiles.0 {
        let Some(sheet) = sprites.get(&tile.sprite) else {
            continue;
        };
        let size = IVec2::new(sheet.frame_width, sheet.frame_height);
        let screen = round_to_grid(tile.position.as_vec2() - camera);
        backend.draw_texture(sheet.texture, rect_at(IVec2::ZERO, size), rect_at(screen, size), 0.0, false);
    }
}

/// Draw one frame. Call once per frame, after the update.
pub fn render_frame(world: &mut World, backend: &mut dyn RenderBackend, dt: f32) {
    let view = backend.window_size().as_vec2();
    follow_camera(world, view, dt);

    let world: &World = world;
    let camera = camera_position(world);
    let Some(sprites) = world.get_resource::<SpriteRegistry>() else {
        return;
    };
    let bar_height = world
        .get_resource::<Tunables>()
        .map_or(Tunables::default().bar_height, |t| t.bar_height);

    draw_ground(world, backend, camera, sprites);

    let mut items: Vec<DrawItem> = Vec::new();
    let mut q = world.try_query::<(Entity, &EntityId, &SpriteRef, &SimTransform, Option<&Animation>)>();
    if let Some(q) = q.as_mut() {
        for (entity, id, sprite, transform, anim) in q.iter(world) {
            if !transform.active {
                continue;
            }
            // The playing clip wins; the base sprite covers clips that were never loaded.
            let sheet = anim
                .and_then(|a| sprites.get(&a.name))
                .or_else(|| sprites.get(&sprite.0));
            let Some(sheet) = sheet else {
                continue;
            };
            items.push(DrawItem {
                entity,
                id: id.0,
                sheet,
                frame: anim.map_or(0, |a| a.current_frame),
                transform,
            });
        }
    }
    items.sort_by(draw_order);

    let mut bars = Vec::new();
    for item in &items {
        let t = item.transform;
        let size = item.sheet.scaled_size(t.scale);
        let screen = round_to_grid(t.position - camera);
        let angle = if world.get::<Projectile>(item.entity).is_some() {
            world
                .get::<Velocity>(item.entity)
                .map_or(0.0, |v| projectile_angle(v.0))
        } else {
            0.0
        };
        backend.draw_texture(
            item.sheet.texture,
            item.sheet.frame_rect(item.frame),
            rect_at(screen, size),
            angle,
            t.flip_h,
        );

        if world.get::<HealthBar>(item.entity).is_none() {
            continue;
        }
        if let Some(health) = world.get::<Health>(item.entity) {
            let origin = IVec2::new(screen.x, screen.y - size.y / 2);
            bars.push(health_bar_rects(origin, item.sheet.frame_width, bar_height, health));
        }
    }

    for (background, fill) in bars {
        backend.set_draw_color(BAR_BACKGROUND);
        backend.fill_rect(background);
        backend.set_draw_color(BAR_FILL);
        backend.fill_rect(fill);
    }
}
