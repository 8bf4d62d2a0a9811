//! # Layout
//!
//! Derived arrangement of participant tiles. Two shapes:
//!
//! ```text
//! Grid                          Spotlight
//! ┌────┬────┬────┐              ┌──────────────┬─────┐
//! │ A  │ B  │ C  │              │              │  B  │
//! ├────┼────┼────┤              │      A       ├─────┤
//! │ D  │ E  │    │              │   (primary)  │  C  │
//! └────┴────┴────┘              │              ├─────┤
//!                               └──────────────┴─────┘
//! ```
//!
//! Column counts are a presentation hint, not a hard constraint.

use serde::Serialize;

use super::participant::Participant;

/// Viewport size class used to pick a concrete column count.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Breakpoint {
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "medium")]
    #[default]
    Medium,
    #[serde(rename = "large")]
    Large,
}

/// Column range for the uniform grid.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridColumns {
    pub min: u8,
    pub max: u8,
}

impl GridColumns {
    /// Column policy for a roster of `count` participants.
    ///
    /// 1–2 → up to 2, 3–4 → exactly 2, 5+ → 2 to 4. An empty roster is
    /// treated like a single participant.
    pub fn for_count(count: usize) -> Self {
        match count {
            0..=2 => GridColumns { min: 1, max: 2 },
            3..=4 => GridColumns { min: 2, max: 2 },
            _ => GridColumns { min: 2, max: 4 },
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Concrete column count for a viewport.
    pub fn resolve(&self, breakpoint: Breakpoint) -> u8 {
        let wanted = match breakpoint {
            Breakpoint::Small => self.min,
            Breakpoint::Medium => self.min + 1,
            Breakpoint::Large => self.max,
        };
        wanted.clamp(self.min, self.max)
    }
}

/// Free-function form of [`GridColumns::for_count`].
pub fn grid_layout(count: usize) -> GridColumns {
    GridColumns::for_count(count)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout<'a> {
    /// Every participant in roster order.
    Grid {
        tiles: Vec<&'a Participant>,
        columns: GridColumns,
    },
    /// One enlarged participant plus a scrollable strip of everyone else.
    Spotlight {
        primary: &'a Participant,
        others: Vec<&'a Participant>,
    },
}

impl Layout<'_> {
    pub fn is_spotlight(&self) -> bool {
        matches!(self, Layout::Spotlight { .. })
    }

    /// Number of tiles shown across all regions.
    pub fn tile_count(&self) -> usize {
        match self {
            Layout::Grid { tiles, .. } => tiles.len(),
            Layout::Spotlight { others, .. } => others.len() + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_policy_by_count() {
        assert_eq!(grid_layout(1), GridColumns { min: 1, max: 2 });
        assert_eq!(grid_layout(2), GridColumns { min: 1, max: 2 });
        assert_eq!(grid_layout(3), GridColumns { min: 2, max: 2 });
        assert_eq!(grid_layout(4), GridColumns { min: 2, max: 2 });
        assert_eq!(grid_layout(5), GridColumns { min: 2, max: 4 });
        assert_eq!(grid_layout(40), GridColumns { min: 2, max: 4 });
    }

    #[test]
    fn test_grid_policy_is_deterministic() {
        for count in 0..20 {
            assert_eq!(grid_layout(count), grid_layout(count));
        }
    }

    #[test]
    fn test_resolve_per_breakpoint() {
        let small_room = grid_layout(2);
        assert_eq!(small_room.resolve(Breakpoint::Small), 1);
        assert_eq!(small_room.resolve(Breakpoint::Medium), 2);
        assert_eq!(small_room.resolve(Breakpoint::Large), 2);

        let four = grid_layout(4);
        assert!(four.is_fixed());
        assert_eq!(four.resolve(Breakpoint::Small), 2);
        assert_eq!(four.resolve(Breakpoint::Large), 2);

        let crowd = grid_layout(9);
        assert_eq!(crowd.resolve(Breakpoint::Small), 2);
        assert_eq!(crowd.resolve(Breakpoint::Medium), 3);
        assert_eq!(crowd.resolve(Breakpoint::Large), 4);
    }

    #[test]
    fn test_tile_count() {
        let a = Participant::new("1", "A");
        let b = Participant::new("2", "B");
        let grid = Layout::Grid { tiles: vec![&a, &b], columns: grid_layout(2) };
        assert_eq!(grid.tile_count(), 2);
        assert!(!grid.is_spotlight());

        let spot = Layout::Spotlight { primary: &a, others: vec![&b] };
        assert_eq!(spot.tile_count(), 2);
        assert!(spot.is_spotlight());
    }
}
