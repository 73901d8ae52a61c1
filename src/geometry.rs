//! Page-space rectangles.

/// Axis-aligned rectangle in page coordinates.
///
/// Uses MuPDF's convention: origin at the top-left corner, y growing
/// downward, units in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from its top-left corner and size.
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Smallest rectangle containing all of `points`, or `None` when empty.
    pub fn bounding(points: impl IntoIterator<Item = (f32, f32)>) -> Option<Self> {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Self::new(x, y, x, y),
                Some(r) => Self::new(r.left.min(x), r.top.min(y), r.right.max(x), r.bottom.max(y)),
            })
        })
    }
}

impl From<mupdf::Rect> for Rect {
    fn from(r: mupdf::Rect) -> Self {
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<Rect> for mupdf::Rect {
    fn from(r: Rect) -> Self {
        mupdf::Rect {
            x0: r.left,
            y0: r.top,
            x1: r.right,
            y1: r.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_size() {
        let r = Rect::from_origin_size(270.0, 90.0, 260.0, 100.0);
        assert_eq!(r, Rect::new(270.0, 90.0, 530.0, 190.0));
        assert_eq!(r.width(), 260.0);
        assert_eq!(r.height(), 100.0);
    }

    #[test]
    fn test_bounding_points() {
        let r = Rect::bounding([(10.0, 5.0), (2.0, 8.0), (7.0, 1.0)]).unwrap();
        assert_eq!(r, Rect::new(2.0, 1.0, 10.0, 8.0));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }
}
