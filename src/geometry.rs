#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Finite straight line between two endpoints. Used for both obstacles and cast rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

/// Distance from `ray.a` to the point where `ray` crosses `obstacle`, if they cross.
///
/// Solves `ray.a + t * (ray.b - ray.a) == obstacle.a + s * (obstacle.b - obstacle.a)`
/// and accepts the hit only when both `s` and `t` lie in `[0, 1]`. Parallel,
/// collinear and zero-length inputs make the denominator zero; the resulting
/// infinite or NaN parameters fail the range check, so they report no hit.
pub fn intersect(ray: &Segment, obstacle: &Segment) -> Option<f32> {
    let p0 = ray.a;
    let p2 = obstacle.a;

    let s1_x = ray.b.x - p0.x;
    let s1_y = ray.b.y - p0.y;
    let s2_x = obstacle.b.x - p2.x;
    let s2_y = obstacle.b.y - p2.y;

    let denom = -s2_x * s1_y + s1_x * s2_y;
    let s = (-s1_y * (p0.x - p2.x) + s1_x * (p0.y - p2.y)) / denom;
    let t = (s2_x * (p0.y - p2.y) - s2_y * (p0.x - p2.x)) / denom;

    // NaN and +-inf never fall inside the unit range
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&t) {
        return None;
    }

    let hit = Point::new(p0.x + t * s1_x, p0.y + t * s1_y);
    Some(p0.distance(hit))
}
