pub mod drag;

use glam::Vec2;

use crate::puzzle::definition::StackSpec;

/// Runtime state of one draggable fragment column.
///
/// `selected_index` is the authoritative game state: which discrete row of
/// the stack currently sits in the target row. `pos` is the visual position
/// the host renders from; it only agrees with `selected_index` when the
/// stack is at rest (not grabbed, not settling).
#[derive(Debug, Clone)]
pub struct StackRuntime {
    /// Letter fragments, top to bottom. Immutable for the level.
    pub fragments: Vec<String>,
    /// Current discrete row selection, `0..=fragments.len()` inclusive.
    /// The value one past the last fragment is the empty slot above the
    /// topmost fragment, reachable from puzzle data but not from a drag.
    pub selected_index: usize,
    /// Current visual position. `x` is the fixed column center.
    pub pos: Vec2,
    /// Vertical rest position: where the stack sits with row 0 selected.
    pub rest_y: f32,
}

impl StackRuntime {
    pub fn new(fragments: Vec<String>, selected_index: usize, rest: Vec2, row_height: f32) -> Self {
        let pos = Vec2::new(rest.x, rest.y - selected_index as f32 * row_height);
        Self {
            fragments,
            selected_index,
            pos,
            rest_y: rest.y,
        }
    }

    pub fn from_spec(spec: &StackSpec, row_height: f32) -> Self {
        Self::new(
            spec.fragments.clone(),
            spec.initial_index,
            spec.pos,
            row_height,
        )
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Single-fragment stacks represent fixed letters and never move.
    pub fn is_interactive(&self) -> bool {
        self.fragments.len() > 1
    }

    /// The vertical position that puts `index` in the target row.
    pub fn row_y(&self, index: usize, row_height: f32) -> f32 {
        self.rest_y - index as f32 * row_height
    }

    /// Whether a world-space point falls on this stack's current extent.
    /// Fragment `k` renders centered at `pos.y + k * row_height`.
    pub fn hit_test(&self, point: Vec2, row_height: f32, column_width: f32) -> bool {
        let half_col = column_width * 0.5;
        let top = self.pos.y - row_height * 0.5;
        let bottom = self.pos.y + (self.fragments.len() as f32 - 0.5) * row_height;
        (point.x - self.pos.x).abs() <= half_col && point.y >= top && point.y <= bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(n: usize, selected: usize) -> StackRuntime {
        let fragments = (0..n).map(|i| format!("f{}", i)).collect();
        StackRuntime::new(fragments, selected, Vec2::new(400.0, 480.0), 120.0)
    }

    #[test]
    fn initial_offset_matches_selection() {
        let s = stack(4, 2);
        assert_eq!(s.pos.y, 480.0 - 2.0 * 120.0);
        assert_eq!(s.rest_y, 480.0);
    }

    #[test]
    fn single_fragment_is_not_interactive() {
        assert!(!stack(1, 0).is_interactive());
        assert!(stack(2, 0).is_interactive());
    }

    #[test]
    fn hit_test_covers_the_column() {
        let s = stack(3, 0);
        assert!(s.hit_test(Vec2::new(400.0, 480.0), 120.0, 140.0));
        // Bottom fragment
        assert!(s.hit_test(Vec2::new(430.0, 480.0 + 2.0 * 120.0), 120.0, 140.0));
        // Off to the side
        assert!(!s.hit_test(Vec2::new(500.0, 480.0), 120.0, 140.0));
        // Above the top fragment
        assert!(!s.hit_test(Vec2::new(400.0, 300.0), 120.0, 140.0));
    }
}
