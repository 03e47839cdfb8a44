//! Continuous-space wall rectangles and the circle-vs-rectangle test used to
//! keep the player inside corridors.

use crate::maze::Grid;

/// Axis-aligned wall rectangle in play-area pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Point of the rectangle closest to (px, py).
    pub fn closest_point(&self, px: f64, py: f64) -> (f64, f64) {
        (
            px.clamp(self.x, self.x + self.width),
            py.clamp(self.y, self.y + self.height),
        )
    }

    pub fn intersects_circle(&self, cx: f64, cy: f64, radius: f64) -> bool {
        // A zero-radius body is a point with no extent; it touches nothing.
        if radius <= 0.0 {
            return false;
        }
        let (tx, ty) = self.closest_point(cx, cy);
        let (dx, dy) = (cx - tx, cy - ty);
        dx * dx + dy * dy <= radius * radius
    }
}

/// Size of the play area; the circle must stay fully inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains_circle(&self, cx: f64, cy: f64, radius: f64) -> bool {
        cx - radius >= 0.0
            && cx + radius <= self.width
            && cy - radius >= 0.0
            && cy + radius <= self.height
    }
}

/// Emits the four boundary strips followed by one strip per retained interior
/// wall flag. Flags on the outer edge are skipped since the boundary strips
/// already cover them. Each cell draws its own walls inset into the cell, so
/// a closed interior edge yields one strip from each side.
pub fn build_obstacles(grid: &Grid, cell_size: f64, wall_thickness: f64) -> Vec<Obstacle> {
    let (w, h) = (grid.width(), grid.height());
    let area_w = w as f64 * cell_size;
    let area_h = h as f64 * cell_size;
    let t = wall_thickness;

    let mut obstacles = vec![
        Obstacle::new(0.0, 0.0, area_w, t),
        Obstacle::new(area_w - t, 0.0, t, area_h),
        Obstacle::new(0.0, area_h - t, area_w, t),
        Obstacle::new(0.0, 0.0, t, area_h),
    ];

    for cell in grid.cells() {
        let cx = cell.x as f64 * cell_size;
        let cy = cell.y as f64 * cell_size;
        let walls = &cell.walls;

        if walls.top && cell.y > 0 {
            obstacles.push(Obstacle::new(cx, cy, cell_size, t));
        }
        if walls.right && cell.x + 1 < w {
            obstacles.push(Obstacle::new(cx + cell_size - t, cy, t, cell_size));
        }
        if walls.bottom && cell.y + 1 < h {
            obstacles.push(Obstacle::new(cx, cy + cell_size - t, cell_size, t));
        }
        if walls.left && cell.x > 0 {
            obstacles.push(Obstacle::new(cx, cy, t, cell_size));
        }
    }

    obstacles
}

/// True if a circle at (cx, cy) leaves the bounds or touches any obstacle.
pub fn collides(
    cx: f64,
    cy: f64,
    radius: f64,
    obstacles: &[Obstacle],
    bounds_w: f64,
    bounds_h: f64,
) -> bool {
    let bounds = Bounds {
        width: bounds_w,
        height: bounds_h,
    };
    if !bounds.contains_circle(cx, cy, radius) {
        return true;
    }
    obstacles
        .iter()
        .any(|o| o.intersects_circle(cx, cy, radius))
}
