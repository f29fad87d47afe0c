//! Grid coordinates, compass steps, and the Manhattan metric.
//!
//! The world is a square `grid_size × grid_size` lattice with the origin in
//! the top-left corner.  All proximity and path-choice computations use the
//! Manhattan distance `|x1 - x2| + |y1 - y2|`; scans use a square ("box")
//! neighbourhood where each axis is checked against the radius on its own.

use std::fmt;

/// A cell on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` lies within `radius` of `self` on both axes.
    #[inline]
    pub fn within_box(self, other: GridPos, radius: f64) -> bool {
        f64::from(self.x.abs_diff(other.x)) <= radius
            && f64::from(self.y.abs_diff(other.y)) <= radius
    }

    /// `true` if both coordinates lie in `[0, grid_size)`.
    #[inline]
    pub fn in_bounds(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }

    /// The cell reached by applying `step` once.
    #[inline]
    pub fn offset(self, step: Step) -> GridPos {
        GridPos::new(self.x + step.dx, self.y + step.dy)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// A unit move along x and/or y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Manhattan distance from `from + step * speed` to `target`.
    ///
    /// Speed only scales the step for this comparison; the position update
    /// itself is always a unit step.
    pub fn scaled_distance(self, from: GridPos, speed: f64, target: GridPos) -> f64 {
        let nx = f64::from(from.x) + f64::from(self.dx) * speed;
        let ny = f64::from(from.y) + f64::from(self.dy) * speed;
        (nx - f64::from(target.x)).abs() + (ny - f64::from(target.y)).abs()
    }
}

/// The eight compass steps, axis-aligned first, in the order ties are broken.
pub const DIRECTIONS: [Step; 8] = [
    Step::new(0, 1),
    Step::new(0, -1),
    Step::new(1, 0),
    Step::new(-1, 0),
    Step::new(1, 1),
    Step::new(-1, -1),
    Step::new(1, -1),
    Step::new(-1, 1),
];

/// Reflective boundary: invert each axis of `step` whose result would leave
/// `[0, grid_size)` when applied at `pos`.
pub fn adjust_move_if_outside_grid(pos: GridPos, step: Step, grid_size: i32) -> Step {
    let next = pos.offset(step);
    let mut adjusted = step;
    if next.x < 0 || next.x >= grid_size {
        adjusted.dx = -adjusted.dx;
    }
    if next.y < 0 || next.y >= grid_size {
        adjusted.dy = -adjusted.dy;
    }
    adjusted
}
