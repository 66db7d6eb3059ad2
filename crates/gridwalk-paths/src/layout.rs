use gridwalk_core::Dims;

use crate::graph::GraphError;

/// Placement of walls, start and goal as row-major node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub walls: Vec<usize>,
    pub start: usize,
    pub goal: usize,
}

impl Layout {
    /// The stock layout derived from the grid dimensions.
    ///
    /// These formulas are layout constants with no general derivation: they
    /// are tuned for grids around 6x6 and stop fitting on small or very
    /// narrow grids (5x5 already pushes a wall out of range). Grids they do
    /// not fit are rejected with [`GraphError::TooSmall`].
    pub fn standard(dims: Dims) -> Result<Self, GraphError> {
        // i64 holds every intermediate for any pair of i32 sides.
        let (r, c) = (i64::from(dims.rows), i64::from(dims.cols));
        let right = r * 2 + c * 2;
        let walls = [
            // left side
            (r - 2) / 2 + c,
            (r - 1) / 2 + c,
            (r + 1) / 2 + c,
            r - 1 + c + 1,
            r + c * 2,
            r,
            // right side
            right + r + 3,
            right + 1,
        ];
        let goal = c * (r + 1) / 4;
        let start = (c + 2) * (r + 1) / 2;

        let indices = || walls.iter().chain([&goal, &start]).copied();
        let required = indices().max().unwrap_or(0) + 1;
        let lowest = indices().min().unwrap_or(0);
        let len = i64::try_from(dims.len()).unwrap_or(i64::MAX);
        if dims.is_empty() || required > len || lowest < 0 {
            return Err(GraphError::TooSmall {
                rows: dims.rows,
                cols: dims.cols,
                required: usize::try_from(required.max(0)).unwrap_or(usize::MAX),
            });
        }

        // In range: every index is in [0, len).
        let index = |i: i64| i as usize;
        Ok(Self {
            walls: walls.iter().map(|&w| index(w)).collect(),
            start: index(start),
            goal: index(goal),
        })
    }

    /// A layout without walls.
    pub fn open(start: usize, goal: usize) -> Self {
        Self {
            walls: Vec::new(),
            start,
            goal,
        }
    }

    /// Largest index referenced, plus one.
    pub(crate) fn required_len(&self) -> usize {
        self.walls
            .iter()
            .chain([&self.start, &self.goal])
            .copied()
            .max()
            .unwrap_or(0)
            + 1
    }
}
