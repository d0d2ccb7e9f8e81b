use std::ops::{Add, Sub};

/// A 2D point in device-independent pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a point at the origin (0, 0)
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from(arr: [f32; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }
}

impl From<Point> for [f32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// Width and height pair (scroll content extents, text measurements)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Axis-aligned rectangle defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: [x, y],
            max: [x + width, y + height],
        }
    }

    pub fn from_min_size(min: [f32; 2], size: [f32; 2]) -> Self {
        Self::from_xywh(min[0], min[1], size[0], size[1])
    }

    /// Rectangle spanning `half_width` / `half_height` around `center`
    pub fn from_center(center: Point, half_width: f32, half_height: f32) -> Self {
        Self {
            min: [center.x - half_width, center.y - half_height],
            max: [center.x + half_width, center.y + half_height],
        }
    }

    pub fn x(&self) -> f32 {
        self.min[0]
    }

    pub fn y(&self) -> f32 {
        self.min[1]
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside this rectangle (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min[0]
            && point.x <= self.max[0]
            && point.y >= self.min[1]
            && point.y <= self.max[1]
    }

    /// Get the intersection of this rect with another
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min[0].max(other.min[0]);
        let min_y = self.min[1].max(other.min[1]);
        let max_x = self.max[0].min(other.max[0]);
        let max_y = self.max[1].min(other.max[1]);

        if min_x <= max_x && min_y <= max_y {
            Some(Rect {
                min: [min_x, min_y],
                max: [max_x, max_y],
            })
        } else {
            None
        }
    }

    /// Shrink every edge by `amount`. Never produces a negative size.
    pub fn inset(&self, amount: f32) -> Rect {
        self.inset_xy(amount, amount)
    }

    pub fn inset_xy(&self, dx: f32, dy: f32) -> Rect {
        let center = self.center();
        let half_w = (self.width() * 0.5 - dx).max(0.0);
        let half_h = (self.height() * 0.5 - dy).max(0.0);
        Rect::from_center(center, half_w, half_h)
    }

    pub fn inflate(&self, amount: f32) -> Rect {
        Rect {
            min: [self.min[0] - amount, self.min[1] - amount],
            max: [self.max[0] + amount, self.max[1] + amount],
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            min: [self.min[0] + dx, self.min[1] + dy],
            max: [self.max[0] + dx, self.max[1] + dy],
        }
    }

    /// Scale around the center (press feedback on glyph boxes)
    pub fn scale_from_center(&self, factor: f32) -> Rect {
        Rect::from_center(
            self.center(),
            self.width() * 0.5 * factor,
            self.height() * 0.5 * factor,
        )
    }

    /// Round both corners to the nearest physical pixel for the given DPI scale.
    pub fn snap_to_pixels(&self, scale_factor: f32) -> Rect {
        if scale_factor <= 0.0 {
            return *self;
        }
        let snap = |v: f32| (v * scale_factor).round() / scale_factor;
        Rect {
            min: [snap(self.min[0]), snap(self.min[1])],
            max: [snap(self.max[0]), snap(self.max[1])],
        }
    }

    /// Convert min corner to Point
    pub fn min_point(&self) -> Point {
        Point::new(self.min[0], self.min[1])
    }

    /// Convert max corner to Point
    pub fn max_point(&self) -> Point {
        Point::new(self.max[0], self.max[1])
    }
}
