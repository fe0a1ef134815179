use crate::error::Error;
use crate::units::Density;

/// Tracks how much of the current page is already spoken for and hands out
/// the space left for the next unit of content.
///
/// The cursor is an infinite, non-restartable producer: each pull yields the
/// free space on the current page in standard units and moves on to a fresh
/// page, so the first value reflects whatever was `advance`d onto the first
/// page (a section's heading and text) and every later value is the full
/// page capacity. One cursor is created per section.
#[derive(Clone, Debug)]
pub struct PageCursor {
    capacity: f32,
    placed: f32,
    density: Density,
}

impl PageCursor {
    pub fn new(capacity_pts: f32, density: Density) -> Result<Self, Error> {
        if !(capacity_pts > 0.0) {
            return Err(Error::Config(format!(
                "page capacity must be positive, got {capacity_pts}"
            )));
        }
        Ok(Self {
            capacity: capacity_pts,
            placed: 0.0,
            density,
        })
    }

    /// Record `height_pts` points of content placed on the current page.
    pub fn advance(&mut self, height_pts: f32) {
        self.placed += height_pts.max(0.0);
    }

    /// Points placed on the current page so far.
    pub fn placed(&self) -> f32 {
        self.placed
    }
}

impl Iterator for PageCursor {
    type Item = f32;

    /// Free space on the current page in standard units. Never `None`.
    fn next(&mut self) -> Option<f32> {
        if self.placed >= self.capacity {
            // Content already overflowed onto a later page; only the
            // remainder occupies the page this pull refers to.
            self.placed %= self.capacity;
        }
        let free = self.capacity - self.placed;
        self.placed = 0.0;
        Some(self.density.points_to_std(free))
    }
}
