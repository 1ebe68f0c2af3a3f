use serde::{Deserialize, Serialize};

/// A two-component value used for both sizes and positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unpacks a machine word holding two unsigned 16-bit halves
    /// (low half = x, high half = y).
    ///
    /// The packed form has a precision ceiling: it cannot carry negative
    /// coordinates or anything above 65535. A window dragged left of the
    /// primary monitor therefore reports a large positive value here, not a
    /// negative one. Callers needing exact screen coordinates should query
    /// the window directly instead of relying on event payloads.
    pub const fn unpack(word: isize) -> Self {
        let bits = word as usize;
        Self {
            x: (bits & 0xFFFF) as i32,
            y: ((bits >> 16) & 0xFFFF) as i32,
        }
    }
}

/// A rectangle representing a window's position and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Width and height as a vector.
    pub fn size(&self) -> Vector {
        Vector::new(self.width, self.height)
    }

    /// Exclusive right edge, clamped at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, clamped at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns whether a point lies inside the rectangle.
    ///
    /// The right and bottom edges are exclusive.
    pub fn contains(&self, point: Vector) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.right()
            && point.y < self.bottom()
    }

    /// Returns the overlapping area of two rectangles, or an empty
    /// rectangle anchored at `self`'s origin when they don't overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Rect::new(self.x, self.y, 0, 0);
        }
        Rect::new(left, top, right - left, bottom - top)
    }
}
