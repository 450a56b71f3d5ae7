//! Viewport culling: which tile indices can touch the screen.

use macroquad::prelude::*;

/// Inclusive tile-index rectangle to iterate when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32, // inclusive
    pub y1: i32, // inclusive
}

impl TileRect {
    /// Number of tiles covered by the rectangle.
    pub fn count(&self) -> usize {
        ((self.x1 - self.x0 + 1) as usize) * ((self.y1 - self.y0 + 1) as usize)
    }
}

/// Tile indices visible through a camera viewport, with a one-tile skirt on
/// every side so a camera resting mid-tile never shows a seam.
///
/// Clamped to the grid; `None` when the view lies entirely off the map or
/// the grid is degenerate. The returned rectangle is what bounds per-frame
/// draw cost by viewport size instead of map size.
pub fn visible_tile_rect(
    camera: Vec2,
    viewport: Vec2,
    tile: Vec2,
    grid_w: u32,
    grid_h: u32,
) -> Option<TileRect> {
    if tile.x <= 0.0 || tile.y <= 0.0 || grid_w == 0 || grid_h == 0 {
        return None;
    }

    let x0 = ((camera.x / tile.x).floor() as i32 - 1).max(0);
    let y0 = ((camera.y / tile.y).floor() as i32 - 1).max(0);
    let x1 = (((camera.x + viewport.x) / tile.x).ceil() as i32 + 1).min(grid_w as i32 - 1);
    let y1 = (((camera.y + viewport.y) / tile.y).ceil() as i32 + 1).min(grid_h as i32 - 1);

    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some(TileRect { x0, y0, x1, y1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_bounded_by_viewport_not_map_size() {
        // 1000x1000 map, 800x600 viewport, 16px tiles: the iterated tile
        // count must stay near ceil(800/16) * ceil(600/16), nowhere near
        // the map's 1_000_000 tiles.
        let tile = vec2(16.0, 16.0);
        let viewport = vec2(800.0, 600.0);
        let cols = (800 + 15) / 16; // ceil
        let rows = (600 + 15) / 16;

        let rect =
            visible_tile_rect(vec2(512.0, 512.0), viewport, tile, 1000, 1000).expect("rect");
        assert_eq!(rect.count(), ((cols + 3) * (rows + 3)) as usize);

        // Mid-tile camera gains at most one extra row and column.
        let rect =
            visible_tile_rect(vec2(519.5, 507.25), viewport, tile, 1000, 1000).expect("rect");
        assert!(rect.count() <= ((cols + 4) * (rows + 4)) as usize);
    }

    #[test]
    fn rect_clamps_to_grid_bounds() {
        let rect = visible_tile_rect(vec2(-8.0, -8.0), vec2(64.0, 64.0), vec2(16.0, 16.0), 4, 4)
            .expect("rect");
        assert_eq!(rect, TileRect { x0: 0, y0: 0, x1: 3, y1: 3 });
    }

    #[test]
    fn includes_one_tile_skirt_when_camera_is_mid_tile() {
        let rect = visible_tile_rect(vec2(24.0, 24.0), vec2(32.0, 32.0), vec2(16.0, 16.0), 100, 100)
            .expect("rect");
        // floor(24/16)-1 = 0, ceil(56/16)+1 = 5.
        assert_eq!(rect, TileRect { x0: 0, y0: 0, x1: 5, y1: 5 });
    }

    #[test]
    fn view_fully_off_map_is_empty() {
        assert!(visible_tile_rect(vec2(10_000.0, 0.0), vec2(64.0, 64.0), vec2(16.0, 16.0), 8, 8)
            .is_none());
        assert!(visible_tile_rect(vec2(0.0, 0.0), vec2(64.0, 64.0), vec2(0.0, 0.0), 8, 8)
            .is_none());
    }
}
