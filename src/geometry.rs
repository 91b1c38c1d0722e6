//! Plane geometry shared by every entity: vectors, rectangles, the
//! playfield and the eight compass directions the player can face.
//!
//! Screen coordinates: x grows to the right, y grows downward.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ── Vectors ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(Vec2::new(self.x / len, self.y / len))
    }

    /// Unit vector for a screen heading in degrees (0° = right, 90° = up).
    pub fn from_heading(degrees: f32) -> Vec2 {
        let rad = degrees.to_radians();
        Vec2::new(rad.cos(), -rad.sin())
    }

    /// Screen heading of this vector in degrees (0° = right, 90° = up).
    /// Straight left is 180°, never -180°.
    pub fn heading(self) -> f32 {
        // `0.0 - y` keeps a zero y at +0.0; plain negation would flip the sign.
        (0.0 - self.y).atan2(self.x).to_degrees()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ── Rectangles ────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle stored by its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self { center, width, height }
    }

    /// Bounding box of a `width`×`height` sprite rotated by `degrees`,
    /// the way a rotated image grows its bounds.
    pub fn rotated(center: Vec2, width: f32, height: f32, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Self::new(center, width * cos + height * sin, width * sin + height * cos)
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Playfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `bounds_check` collapsed to a single "fully inside" answer.
    pub fn contains(&self, rect: &Rect) -> bool {
        bounds_check(rect, self) == (true, true)
    }
}

/// Per-axis containment: `(horizontal, vertical)`, each `true` iff the
/// rectangle lies fully inside the playfield on that axis.
pub fn bounds_check(rect: &Rect, field: &Playfield) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= field.width;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= field.height;
    (horizontal, vertical)
}

/// Unit vector from `origin`'s center toward `target`'s center.
///
/// Returns `None` when both centers coincide.
pub fn direction_vector(origin: &Rect, target: &Rect) -> Option<Vec2> {
    (target.center - origin.center).normalized()
}

// ── Compass directions ────────────────────────────────────────────────────────

/// The eight directions the player can face, counter-clockwise from right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Direction of a net movement vector; `None` when nothing moves.
    pub fn from_components(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (1, -1) => Some(Direction::UpRight),
            (0, -1) => Some(Direction::Up),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, 1) => Some(Direction::DownLeft),
            (0, 1) => Some(Direction::Down),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Sign tuple of the direction in screen coordinates.
    pub fn components(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::UpRight => (1, -1),
            Direction::Up => (0, -1),
            Direction::UpLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, 1),
            Direction::Down => (0, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// The raw (unnormalized) sign tuple as a vector.
    pub fn vector(self) -> Vec2 {
        let (dx, dy) = self.components();
        Vec2::new(dx as f32, dy as f32)
    }

    /// Screen heading in degrees: right = 0, up = 90, left = 180, down = -90.
    pub fn heading(self) -> f32 {
        self.vector().heading()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn orientation(self) -> Orientation {
        ORIENTATIONS[self.index()]
    }
}

/// How the base sprite (drawn facing left) is transformed for a direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Mirror the base sprite horizontally before rotating.
    pub mirrored: bool,
    /// Counter-clockwise rotation applied after mirroring.
    pub rotation: f32,
}

impl Orientation {
    /// Heading the transformed sprite ends up facing.
    pub fn heading(&self) -> f32 {
        if self.mirrored {
            self.rotation
        } else {
            180.0 + self.rotation
        }
    }
}

/// Indexed by [`Direction::index`].
pub const ORIENTATIONS: [Orientation; 8] = [
    Orientation { mirrored: true, rotation: 0.0 },
    Orientation { mirrored: true, rotation: 45.0 },
    Orientation { mirrored: true, rotation: 90.0 },
    Orientation { mirrored: false, rotation: -45.0 },
    Orientation { mirrored: false, rotation: 0.0 },
    Orientation { mirrored: false, rotation: 45.0 },
    Orientation { mirrored: true, rotation: -90.0 },
    Orientation { mirrored: true, rotation: -45.0 },
];
