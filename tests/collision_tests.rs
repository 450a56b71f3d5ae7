// tests/collision_tests.rs

use std::collections::HashSet;

use macroquad::prelude::*;
use tilegrid::{
    aabb_overlap, check_tilemap_collision, resolve_collision, Aabb, TileCollider,
};

// Fixture collider: a set of solid tile coordinates on a uniform grid.
struct Grid {
    tile: f32,
    solid: HashSet<(i32, i32)>,
}

impl Grid {
    fn new(tile: f32, solid: &[(i32, i32)]) -> Self {
        Grid {
            tile,
            solid: solid.iter().copied().collect(),
        }
    }
}

impl TileCollider for Grid {
    fn tile_size(&self) -> Vec2 {
        vec2(self.tile, self.tile)
    }

    fn is_tile_colliding(&self, tile_x: i32, tile_y: i32, _layer: &str) -> bool {
        self.solid.contains(&(tile_x, tile_y))
    }
}

#[test]
fn free_movement_passes_velocity_through() {
    let grid = Grid::new(10.0, &[]);
    let out = resolve_collision(&grid, &Aabb::new(0.0, 0.0, 10.0, 10.0), vec2(5.0, 5.0), "world");
    assert_eq!(out.position, vec2(5.0, 5.0));
    assert_eq!(out.velocity, vec2(5.0, 5.0));
}

#[test]
fn axes_resolve_independently() {
    // Floor tile below the box: X stays free, Y snaps back to the surface.
    let grid = Grid::new(10.0, &[(0, 1)]);
    let out = resolve_collision(&grid, &Aabb::new(0.0, 0.0, 10.0, 10.0), vec2(5.0, 5.0), "world");
    assert_eq!(out.position, vec2(5.0, 0.0));
    assert_eq!(out.velocity, vec2(5.0, 0.0));
}

#[test]
fn corner_contact_slides_along_the_wall() {
    // Wall to the right: X is blocked first, then Y resolves from the
    // corrected X and stays free, so diagonal input slides instead of
    // freezing in the corner.
    let grid = Grid::new(10.0, &[(1, 0)]);
    let out = resolve_collision(&grid, &Aabb::new(0.0, 0.0, 10.0, 10.0), vec2(5.0, 5.0), "world");
    assert_eq!(out.position, vec2(0.0, 5.0));
    assert_eq!(out.velocity, vec2(0.0, 5.0));
}

#[test]
fn positive_motion_snaps_flush_to_the_tile_boundary() {
    let grid = Grid::new(10.0, &[(2, 0)]);
    let out =
        resolve_collision(&grid, &Aabb::new(0.0, 0.0, 10.0, 10.0), vec2(15.0, 0.0), "world");
    // Solid tile starts at x=20; the 10-wide box ends up flush at x=10.
    assert_eq!(out.position, vec2(10.0, 0.0));
    assert_eq!(out.velocity, vec2(0.0, 0.0));
}

#[test]
fn negative_motion_snaps_to_the_trailing_boundary() {
    let grid = Grid::new(10.0, &[(0, 0)]);
    let out =
        resolve_collision(&grid, &Aabb::new(12.0, 0.0, 10.0, 10.0), vec2(-7.5, 0.0), "world");
    // Solid tile ends at x=10; the box stops exactly there.
    assert_eq!(out.position, vec2(10.0, 0.0));
    assert_eq!(out.velocity, vec2(0.0, 0.0));
}

#[test]
fn edge_exactly_on_tile_boundary_does_not_overlap() {
    let grid = Grid::new(10.0, &[(1, 0)]);
    // Box [0,10) x [0,10): its right edge touches the solid tile at x=10
    // without overlapping it.
    assert!(!check_tilemap_collision(&grid, &Aabb::new(0.0, 0.0, 10.0, 10.0), "world"));
    // One pixel further and it overlaps.
    assert!(check_tilemap_collision(&grid, &Aabb::new(1.0, 0.0, 10.0, 10.0), "world"));
}

#[test]
fn zero_velocity_axes_are_left_untouched() {
    let grid = Grid::new(10.0, &[(1, 0)]);
    let start = Aabb::new(0.0, 3.0, 10.0, 10.0);
    let out = resolve_collision(&grid, &start, Vec2::ZERO, "world");
    assert_eq!(out.position, vec2(0.0, 3.0));
    assert_eq!(out.velocity, Vec2::ZERO);
}

#[test]
fn unloaded_collider_fails_open() {
    // A zero tile size means "nothing loaded": no collision anywhere, so
    // motion passes through and velocity is preserved, never a silent wall.
    let grid = Grid::new(0.0, &[(0, 0), (1, 0), (0, 1)]);
    assert!(!check_tilemap_collision(&grid, &Aabb::new(0.0, 0.0, 10.0, 10.0), "world"));

    let out = resolve_collision(&grid, &Aabb::new(3.0, 4.0, 10.0, 10.0), vec2(7.0, -2.0), "world");
    assert_eq!(out.position, vec2(10.0, 2.0));
    assert_eq!(out.velocity, vec2(7.0, -2.0));
}

#[test]
fn aabb_overlap_is_strict() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(aabb_overlap(&a, &Aabb::new(5.0, 5.0, 10.0, 10.0)));
    assert!(aabb_overlap(&a, &Aabb::new(2.0, 2.0, 4.0, 4.0)));
    // Exactly touching edges or corners do not count as collision.
    assert!(!aabb_overlap(&a, &Aabb::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!aabb_overlap(&a, &Aabb::new(0.0, 10.0, 10.0, 10.0)));
    assert!(!aabb_overlap(&a, &Aabb::new(10.0, 10.0, 10.0, 10.0)));
    assert!(!aabb_overlap(&a, &Aabb::new(11.0, 0.0, 10.0, 10.0)));
}
