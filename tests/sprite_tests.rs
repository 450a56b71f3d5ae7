// tests/sprite_tests.rs

use tilegrid::SpriteSheet;

fn sheet_with_idle(repeat: bool) -> SpriteSheet {
    let mut sheet = SpriteSheet::new();
    // 4 frames at 10 fps: 0.4s total.
    sheet.add_animation("idle", "player", 0, 3, 10.0, repeat);
    sheet
}

#[test]
fn animation_frames_use_zero_padded_names() {
    let sheet = sheet_with_idle(true);
    let clip = sheet.animation("idle").expect("registered clip");
    assert_eq!(
        clip.frames,
        vec!["player.000", "player.001", "player.002", "player.003"]
    );
}

#[test]
fn frame_index_advances_with_elapsed_time() {
    let sheet = sheet_with_idle(false);
    assert_eq!(sheet.animation_frame("idle", 0.0), Some("player.000"));
    assert_eq!(sheet.animation_frame("idle", 0.15), Some("player.001"));
    assert_eq!(sheet.animation_frame("idle", 0.25), Some("player.002"));
    assert_eq!(sheet.animation_frame("idle", 0.39), Some("player.003"));
}

#[test]
fn non_looping_clip_clamps_to_the_last_frame() {
    let sheet = sheet_with_idle(false);
    // Past the 0.4s duration the clip holds its last frame.
    assert_eq!(sheet.animation_frame("idle", 1.0), Some("player.003"));
    assert_eq!(sheet.animation_frame("idle", 1000.0), Some("player.003"));
}

#[test]
fn looping_clip_wraps_modulo_duration() {
    let sheet = sheet_with_idle(true);
    // 0.45s into a 0.4s loop is 0.05s into the second pass: frame 0.
    assert_eq!(sheet.animation_frame("idle", 0.45), Some("player.000"));
    assert_eq!(sheet.animation_frame("idle", 0.95), Some("player.001"));
}

#[test]
fn unknown_animation_returns_none() {
    let sheet = sheet_with_idle(true);
    assert_eq!(sheet.animation_frame("swim", 0.0), None);
}

#[test]
fn re_registering_a_name_replaces_the_clip() {
    let mut sheet = sheet_with_idle(true);
    sheet.add_animation("idle", "player", 4, 5, 10.0, true);

    let clip = sheet.animation("idle").expect("registered clip");
    assert_eq!(clip.frames, vec!["player.004", "player.005"]);
    // Lookups reflect only the new frame set.
    assert_eq!(sheet.animation_frame("idle", 0.0), Some("player.004"));
    assert_eq!(sheet.animation_frame("idle", 0.11), Some("player.005"));
}

#[test]
fn zero_frame_rate_holds_the_first_frame() {
    let mut sheet = SpriteSheet::new();
    sheet.add_animation("stuck", "player", 0, 3, 0.0, true);
    assert_eq!(sheet.animation_frame("stuck", 12.5), Some("player.000"));
}

#[test]
fn unloaded_atlas_degrades_without_panicking() {
    let sheet = sheet_with_idle(true);
    assert!(!sheet.is_loaded());
    assert_eq!(sheet.frame_size("player.000"), None);
    // A missing frame or atlas must never take down the render loop.
    sheet.render_frame("player.000", 10.0, 10.0, false);
}
