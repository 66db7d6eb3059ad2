//! The grid graph: node storage, terrain placement and neighbour lookup.
//!
//! A [`Graph`] is built once and never mutated afterwards. Searches borrow
//! it immutably and keep their own per-run state, so one graph can back
//! any number of consecutive searches.

use std::fmt;

use gridwalk_core::{Dims, Position};
use rand::{Rng, RngExt};

use crate::engine::UNREACHABLE;
use crate::layout::Layout;
use crate::node::{GridNode, label};

/// Largest supported node count. Node indices and path costs are `i32`.
pub const MAX_NODES: usize = i32::MAX as usize;

fn check_dims(dims: Dims) -> Result<(), GraphError> {
    if dims.is_empty() {
        return Err(GraphError::InvalidDims {
            rows: dims.rows,
            cols: dims.cols,
        });
    }
    if dims.len() > MAX_NODES {
        return Err(GraphError::TooLarge {
            rows: dims.rows,
            cols: dims.cols,
        });
    }
    Ok(())
}

/// A rows x cols grid of [`GridNode`]s with one start and one goal.
///
/// With the `serde` feature a graph serializes but does not deserialize:
/// rebuild it through [`Graph::parse`] or [`Graph::with_layout`] instead.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Graph {
    dims: Dims,
    nodes: Vec<GridNode>,
    start: usize,
    goal: usize,
}

impl Graph {
    /// Generate a grid with the standard layout, using the thread RNG for
    /// the cosmetic real-node strides.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GraphError> {
        Self::with_rng(rows, cols, &mut rand::rng())
    }

    /// Generate a grid with the standard layout.
    pub fn with_rng(rows: i32, cols: i32, rng: &mut impl Rng) -> Result<Self, GraphError> {
        let dims = Dims::new(rows, cols);
        check_dims(dims)?;
        let layout = Layout::standard(dims)?;
        Self::with_layout(dims, &layout, rng)
    }

    /// Generate a grid with an explicit layout.
    pub fn with_layout(dims: Dims, layout: &Layout, rng: &mut impl Rng) -> Result<Self, GraphError> {
        check_dims(dims)?;
        let required = layout.required_len();
        if required > dims.len() {
            return Err(GraphError::TooSmall {
                rows: dims.rows,
                cols: dims.cols,
                required,
            });
        }

        let mut nodes = Vec::with_capacity(dims.len());
        for (i, p) in dims.iter().enumerate() {
            let x_stride = rng.random_range(1..=3);
            let y_stride = rng.random_range(1..=3);
            let real = p.x % x_stride == 0 && p.y % y_stride == 0;
            nodes.push(GridNode::new(p, label(i), real));
        }
        for &w in &layout.walls {
            nodes[w].wall = true;
        }
        nodes[layout.goal].goal = true;
        nodes[layout.start].occupied = true;

        Ok(Self {
            dims,
            nodes,
            start: layout.start,
            goal: layout.goal,
        })
    }

    /// Assign movement costs. Every weight must lie in
    /// `1..=`[`max_weight`](Self::max_weight).
    pub fn with_weights(mut self, weight: impl Fn(Position) -> i32) -> Result<Self, GraphError> {
        let max = self.max_weight();
        for node in &mut self.nodes {
            let w = weight(node.pos);
            if !(1..=max).contains(&w) {
                return Err(GraphError::InvalidWeight {
                    pos: node.pos,
                    weight: w,
                    max,
                });
            }
            node.weight = w;
        }
        Ok(self)
    }

    /// Heaviest weight this grid accepts. Any route through every node
    /// then costs less than [`UNREACHABLE`].
    pub fn max_weight(&self) -> i32 {
        let len = i32::try_from(self.nodes.len()).unwrap_or(i32::MAX).max(1);
        (UNREACHABLE - 1) / len
    }

    /// Parse an ASCII map: one line per row, one character per column.
    ///
    /// `.` open, `#` wall, `S` start, `G` goal, `1`-`9` open with that
    /// weight. Surrounding whitespace on each line is ignored.
    pub fn parse(text: &str) -> Result<Self, GraphError> {
        let lines: Vec<&str> = text
            .trim()
            .lines()
            .map(str::trim)
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != cols) {
            return Err(GraphError::InconsistentSize);
        }
        let (Ok(rows), Ok(cols)) = (i32::try_from(lines.len()), i32::try_from(cols)) else {
            return Err(GraphError::TooLarge {
                rows: i32::MAX,
                cols: i32::MAX,
            });
        };
        let dims = Dims::new(rows, cols);
        check_dims(dims)?;

        let mut nodes = Vec::with_capacity(dims.len());
        let mut start = None;
        let mut goal = None;
        for (x, line) in lines.iter().enumerate() {
            for (y, ch) in line.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let i = nodes.len();
                let mut node = GridNode::new(pos, label(i), true);
                match ch {
                    '.' => {}
                    '#' => node.wall = true,
                    'S' => {
                        if start.replace(i).is_some() {
                            return Err(GraphError::DuplicateStart(pos));
                        }
                        node.occupied = true;
                    }
                    'G' => {
                        if goal.replace(i).is_some() {
                            return Err(GraphError::DuplicateGoal(pos));
                        }
                        node.goal = true;
                    }
                    '1'..='9' => node.weight = ch as i32 - '0' as i32,
                    _ => return Err(GraphError::InvalidRune { ch, pos }),
                }
                nodes.push(node);
            }
        }

        let graph = Self {
            dims,
            nodes,
            start: start.ok_or(GraphError::MissingStart)?,
            goal: goal.ok_or(GraphError::MissingGoal)?,
        };
        let max = graph.max_weight();
        if let Some(n) = graph.nodes.iter().find(|n| n.weight > max) {
            return Err(GraphError::InvalidWeight {
                pos: n.pos,
                weight: n.weight,
                max,
            });
        }
        Ok(graph)
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of nodes (`rows * cols`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in row-major generation order.
    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&GridNode> {
        self.nodes.get(index)
    }

    /// Nodes carrying the cosmetic real flag.
    pub fn real_nodes(&self) -> impl Iterator<Item = &GridNode> {
        self.nodes.iter().filter(|n| n.real)
    }

    pub fn find_node(&self, pos: Position) -> Option<&GridNode> {
        self.index_of(pos).map(|i| &self.nodes[i])
    }

    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.dims.index(pos)
    }

    pub fn start(&self) -> &GridNode {
        &self.nodes[self.start]
    }

    pub fn goal(&self) -> &GridNode {
        &self.nodes[self.goal]
    }

    pub(crate) fn start_index(&self) -> usize {
        self.start
    }

    pub(crate) fn goal_index(&self) -> usize {
        self.goal
    }

    /// In-grid orthogonal neighbours of `pos`, ordered +x, +y, -x, -y.
    /// Walls are included; empty if `pos` is outside the grid.
    pub fn neighbours(&self, pos: Position) -> Vec<&GridNode> {
        if !self.dims.contains(pos) {
            return Vec::new();
        }
        pos.neighbors_4()
            .into_iter()
            .filter_map(|p| self.find_node(p))
            .collect()
    }

    /// Append neighbour indices of node `i` into `buf`. The caller clears
    /// `buf` first.
    pub(crate) fn neighbours_into(&self, i: usize, buf: &mut Vec<usize>) {
        let p = self.dims.position(i);
        buf.extend(p.neighbors_4().into_iter().filter_map(|n| self.dims.index(n)));
    }

    /// Cost of moving onto node `to`.
    #[inline]
    pub(crate) fn cost(&self, to: usize) -> i32 {
        self.nodes[to].weight
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 && node.pos.y == 0 {
                writeln!(f)?;
            }
            let ch = if node.occupied {
                'S'
            } else if node.goal {
                'G'
            } else if node.wall {
                '#'
            } else if (2..=9).contains(&node.weight) {
                char::from(b'0' + node.weight as u8)
            } else {
                '.'
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Errors that can occur when building a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Rows or columns below 1.
    InvalidDims { rows: i32, cols: i32 },
    /// The layout references node indices the grid does not have.
    TooSmall { rows: i32, cols: i32, required: usize },
    /// More than [`MAX_NODES`] nodes.
    TooLarge { rows: i32, cols: i32 },
    /// A weight outside `1..=max`.
    InvalidWeight { pos: Position, weight: i32, max: i32 },
    /// Map lines have different widths.
    InconsistentSize,
    InvalidRune { ch: char, pos: Position },
    MissingStart,
    MissingGoal,
    DuplicateStart(Position),
    DuplicateGoal(Position),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDims { rows, cols } => {
                write!(f, "grid dimensions must be at least 1x1, got {rows}x{cols}")
            }
            Self::TooSmall { rows, cols, required } => write!(
                f,
                "{rows}x{cols} grid is too small for its layout: needs {required} nodes"
            ),
            Self::TooLarge { rows, cols } => {
                write!(f, "{rows}x{cols} grid exceeds {MAX_NODES} nodes")
            }
            Self::InvalidWeight { pos, weight, max } => {
                write!(f, "weight at {pos} must be in 1..={max}, got {weight}")
            }
            Self::InconsistentSize => write!(f, "map lines have inconsistent widths"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => write!(f, "map has no start (S)"),
            Self::MissingGoal => write!(f, "map has no goal (G)"),
            Self::DuplicateStart(pos) => write!(f, "second start (S) at {pos}"),
            Self::DuplicateGoal(pos) => write!(f, "second goal (G) at {pos}"),
        }
    }
}

impl std::error::Error for GraphError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn graph_serializes_as_data() {
        let g = Graph::parse("S#\n.G").unwrap();
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["start"], 0);
        assert_eq!(json["goal"], 3);
        assert_eq!(json["nodes"][1]["wall"], true);
        // Validated construction is the only way back.
        assert_eq!(Graph::parse(&g.to_string()).unwrap().to_string(), g.to_string());
    }
}
