//! Axis-aligned bounding boxes

use glam::Vec2;

/// Rectangle from its top-left corner and size (canvas coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: rectangles that only touch edges do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap() {
        let player = rect(50.0, 120.0, 30.0, 30.0);
        assert!(player.overlaps(&rect(70.0, 130.0, 20.0, 20.0)));
        assert!(rect(70.0, 130.0, 20.0, 20.0).overlaps(&player));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let player = rect(50.0, 120.0, 30.0, 30.0);
        assert!(!player.overlaps(&rect(80.0, 120.0, 20.0, 20.0)));
        assert!(!player.overlaps(&rect(50.0, 100.0, 20.0, 20.0)));
    }

    #[test]
    fn test_separated() {
        let player = rect(50.0, 120.0, 30.0, 30.0);
        assert!(!player.overlaps(&rect(200.0, 10.0, 30.0, 30.0)));
    }

    #[test]
    fn test_contained() {
        let big = rect(0.0, 0.0, 100.0, 100.0);
        assert!(big.overlaps(&rect(10.0, 10.0, 5.0, 5.0)));
    }
}
