use std::path::Path;

use anyhow::Context;
use macroquad::prelude::*;
use tilegrid::{resolve_collision, Aabb, SpriteSheet, Tilemap};

fn window_conf() -> Conf {
    Conf {
        window_title: "Walkabout".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

const PLAYER_SPEED: f32 = 120.0;

async fn load_world(assets: &Path) -> anyhow::Result<(Tilemap, SpriteSheet)> {
    let map_path = assets.join("farm.json");
    let map_json = std::fs::read_to_string(&map_path)
        .with_context(|| format!("Reading map file {}", map_path.display()))?;

    let mut map = Tilemap::new();
    map.load_map(&map_json)
        .with_context(|| format!("Parsing map file {}", map_path.display()))?;
    map.load_tilesets(assets)
        .await
        .context("Loading tileset images")?;

    let mut sheet = SpriteSheet::new();
    sheet
        .load_atlas(&assets.join("player.json"), &assets.join("player.png"))
        .await
        .context("Loading player atlas")?;
    sheet.add_animation("walk", "player_walk", 0, 7, 12.0, true);
    sheet.add_animation("idle", "player_idle", 0, 3, 6.0, true);

    Ok((map, sheet))
}

#[macroquad::main(window_conf)]
async fn main() {
    let (map, sheet) = match load_world(Path::new("assets")).await {
        Ok(world) => world,
        Err(err) => {
            error!("walkabout: {:#}", err);
            return;
        }
    };

    let spawn = map.find_object("spawns", "player_spawn").unwrap_or(Vec2::ZERO);
    let mut player = Aabb::new(spawn.x, spawn.y, 20.0, 26.0);
    let mut facing_left = false;
    let mut elapsed = 0.0f32;

    loop {
        let dt = get_frame_time();
        elapsed += dt;

        let mut input = Vec2::ZERO;
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            input.x -= 1.0;
            facing_left = true;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            input.x += 1.0;
            facing_left = false;
        }
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            input.y -= 1.0;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            input.y += 1.0;
        }

        let out = resolve_collision(&map, &player, input * PLAYER_SPEED * dt, "world");
        player.x = out.position.x;
        player.y = out.position.y;

        let viewport = vec2(screen_width(), screen_height());
        let camera = vec2(
            player.x + player.w / 2.0 - viewport.x / 2.0,
            player.y + player.h / 2.0 - viewport.y / 2.0,
        );
        set_camera(&Camera2D::from_display_rect(Rect::new(
            camera.x, camera.y, viewport.x, viewport.y,
        )));

        clear_background(BLACK);

        // The player draws between "world" and "above" so tree tops and
        // rooflines occlude correctly.
        map.render("world", camera, viewport);
        let clip = if input == Vec2::ZERO { "idle" } else { "walk" };
        if let Some(frame) = sheet.animation_frame(clip, elapsed) {
            sheet.render_frame(frame, player.x, player.y, facing_left);
        }
        map.render("above", camera, viewport);

        set_default_camera();
        draw_text(&format!("FPS: {}", get_fps()), 20.0, 30.0, 30.0, WHITE);

        next_frame().await;
    }
}
