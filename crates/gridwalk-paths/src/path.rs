//! Path reconstruction from a finished search's came-from links.

use std::fmt;

use gridwalk_core::{Clock, Position};
use log::debug;

use crate::engine::{SearchEngine, SearchObserver};
use crate::node::NodeFlags;
use crate::visual::Link;

/// A route from the start to some target, both included.
///
/// Only built by [`SearchEngine`]; with the `serde` feature it serializes
/// but does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    positions: Vec<Position>,
    cost: i32,
}

impl Path {
    /// Positions from the start to the target.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of nodes, endpoints included.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`: a path holds at least its start.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of the weights of every node entered after the start.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn start(&self) -> Position {
        self.positions[0]
    }

    pub fn end(&self) -> Position {
        self.positions[self.positions.len() - 1]
    }
}

impl SearchEngine<'_> {
    /// The path the last search found to `target`, without touching any
    /// flags. Repeated calls return the same path until the next search
    /// or reset.
    pub fn path_to(&self, target: Position) -> Result<Path, PathError> {
        self.chain_to(target).map(|chain| self.make_path(chain))
    }

    /// Trace the path to `target` backwards, marking each node on it (other
    /// than the start and the goal) as [`NodeFlags::PATH`], one node per
    /// `path_delay`.
    ///
    /// The chain is validated before anything is marked, so a failure
    /// leaves the flags unchanged.
    pub fn reconstruct(
        &mut self,
        target: Position,
        clock: &mut impl Clock,
        observer: &mut impl SearchObserver,
    ) -> Result<Path, PathError> {
        let chain = self.chain_to(target)?;
        let start = self.graph.start_index();
        let goal = self.graph.goal_index();
        for &i in chain.iter().rev().take_while(|&&i| i != start) {
            if i != goal {
                self.visual.insert(i, NodeFlags::PATH);
            }
            observer.on_step(self);
            clock.sleep(self.config.path_delay);
        }
        debug!("path to {target} traced over {} nodes", chain.len());
        Ok(self.make_path(chain))
    }

    fn make_path(&self, chain: Vec<usize>) -> Path {
        let dims = self.graph.dims();
        Path {
            cost: chain.iter().skip(1).map(|&i| self.graph.cost(i)).sum(),
            positions: chain.into_iter().map(|i| dims.position(i)).collect(),
        }
    }

    /// Node indices from the start to `target`.
    fn chain_to(&self, target: Position) -> Result<Vec<usize>, PathError> {
        if self.is_running() {
            return Err(PathError::SearchRunning);
        }
        let to = self
            .graph
            .index_of(target)
            .ok_or(PathError::OutOfBounds(target))?;
        if !self.came_from.contains(to) {
            return Err(PathError::NotReached(target));
        }

        let start = self.graph.start_index();
        let mut chain = vec![to];
        let mut current = to;
        while current != start {
            current = match self.came_from.get(current) {
                Some(Link::From(prev)) => prev,
                _ => return Err(PathError::BrokenChain(target)),
            };
            // A chain longer than the grid must loop.
            if chain.len() >= self.graph.len() {
                return Err(PathError::BrokenChain(target));
            }
            chain.push(current);
        }
        chain.reverse();
        Ok(chain)
    }
}

/// Errors that can occur when reconstructing a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A search is still running over the same links.
    SearchRunning,
    OutOfBounds(Position),
    /// The last search never reached the target (or none has run).
    NotReached(Position),
    /// The links from the target never lead back to the start.
    BrokenChain(Position),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchRunning => write!(f, "no path: a search is still running"),
            Self::OutOfBounds(p) => write!(f, "no path: {p} is outside the grid"),
            Self::NotReached(p) => write!(f, "no path: {p} was not reached"),
            Self::BrokenChain(p) => write!(f, "no path: links from {p} do not lead to the start"),
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gridwalk_core::ManualClock;

    use super::*;
    use crate::engine::{Algorithm, NoopObserver, SearchStatus};
    use crate::graph::Graph;
    use crate::SearchConfig;

    const OPEN: &str = "
        ....G
        .....
        ..S..
        .....
    ";

    fn searched(g: &Graph, algorithm: Algorithm) -> SearchEngine<'_> {
        let mut engine = SearchEngine::new(g, SearchConfig::default());
        engine.run(algorithm, &mut ManualClock::new(), &mut NoopObserver);
        engine
    }

    #[test]
    fn open_grid_path_is_manhattan_plus_one() {
        let g = Graph::parse(OPEN).unwrap();
        let engine = searched(&g, Algorithm::BreadthFirst);
        let path = engine.path_to(g.goal().pos()).unwrap();
        let dist = g.start().pos().manhattan(g.goal().pos()) as usize;
        assert_eq!(path.len(), dist + 1);
        assert_eq!(path.start(), g.start().pos());
        assert_eq!(path.end(), g.goal().pos());
        for pair in path.positions().windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn path_to_is_idempotent() {
        let g = Graph::parse(OPEN).unwrap();
        let mut engine = searched(&g, Algorithm::UniformCost);
        let a = engine.path_to(g.goal().pos()).unwrap();
        let b = engine.path_to(g.goal().pos()).unwrap();
        assert_eq!(a, b);
        let c = engine
            .reconstruct(g.goal().pos(), &mut ManualClock::new(), &mut NoopObserver)
            .unwrap();
        let d = engine
            .reconstruct(g.goal().pos(), &mut ManualClock::new(), &mut NoopObserver)
            .unwrap();
        assert_eq!(a, c);
        assert_eq!(c, d);
    }

    #[test]
    fn reconstruct_marks_interior_nodes() {
        let g = Graph::parse(OPEN).unwrap();
        let mut engine = searched(&g, Algorithm::BreadthFirst);
        let mut clock = ManualClock::new();
        let path = engine
            .reconstruct(g.goal().pos(), &mut clock, &mut NoopObserver)
            .unwrap();

        // Every node but the start is one paced step.
        assert_eq!(clock.sleeps(), path.len() - 1);
        assert_eq!(clock.elapsed(), Duration::from_millis(170) * (path.len() as u32 - 1));

        let marked = engine.visual().count(NodeFlags::PATH);
        assert_eq!(marked, path.len() - 2);
        assert!(!engine.flags(g.goal().pos()).contains(NodeFlags::PATH));
        assert!(!engine.flags(g.start().pos()).contains(NodeFlags::PATH));
        for &p in &path.positions()[1..path.len() - 1] {
            assert!(engine.flags(p).contains(NodeFlags::PATH));
        }
    }

    #[test]
    fn path_to_start_is_single_node() {
        let g = Graph::parse(OPEN).unwrap();
        let mut engine = searched(&g, Algorithm::BreadthFirst);
        let mut clock = ManualClock::new();
        let path = engine
            .reconstruct(g.start().pos(), &mut clock, &mut NoopObserver)
            .unwrap();
        assert_eq!(path.positions(), &[g.start().pos()]);
        assert_eq!(path.cost(), 0);
        assert_eq!(clock.sleeps(), 0);
    }

    #[test]
    fn unreached_target_is_rejected_without_marking() {
        let g = Graph::parse("S#.\n.#G").unwrap();
        let mut engine = searched(&g, Algorithm::BreadthFirst);
        assert_eq!(engine.status(), SearchStatus::Completed(crate::Outcome::NoPath));
        let goal = g.goal().pos();
        assert_eq!(
            engine.reconstruct(goal, &mut ManualClock::new(), &mut NoopObserver),
            Err(PathError::NotReached(goal))
        );
        assert_eq!(engine.visual().count(NodeFlags::PATH), 0);
        let outside = Position::new(9, 9);
        assert_eq!(engine.path_to(outside), Err(PathError::OutOfBounds(outside)));
    }

    #[test]
    fn no_search_means_no_path() {
        let g = Graph::parse(OPEN).unwrap();
        let engine = SearchEngine::new(&g, SearchConfig::default());
        assert_eq!(
            engine.path_to(g.goal().pos()),
            Err(PathError::NotReached(g.goal().pos()))
        );
    }

    #[test]
    fn rejected_while_search_running() {
        let g = Graph::parse(OPEN).unwrap();
        let mut engine = SearchEngine::new(&g, SearchConfig::default());
        engine.start(Algorithm::BreadthFirst);
        engine.step();
        assert_eq!(
            engine.reconstruct(g.start().pos(), &mut ManualClock::new(), &mut NoopObserver),
            Err(PathError::SearchRunning)
        );
    }

    #[test]
    fn looping_links_are_detected() {
        let g = Graph::parse("S..\n...\n..G").unwrap();
        let mut engine = searched(&g, Algorithm::BreadthFirst);
        // Point two nodes at each other so the walk never reaches the start.
        engine.came_from.set(1, Link::From(2));
        engine.came_from.set(2, Link::From(1));
        let p = Position::new(0, 2);
        assert_eq!(engine.path_to(p), Err(PathError::BrokenChain(p)));

        engine.came_from.set(2, Link::Root);
        assert_eq!(engine.path_to(p), Err(PathError::BrokenChain(p)));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            PathError::NotReached(Position::new(1, 2)).to_string(),
            "no path: (1, 2) was not reached"
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use gridwalk_core::ManualClock;

    use super::*;
    use crate::engine::{Algorithm, NoopObserver};
    use crate::graph::Graph;
    use crate::SearchConfig;

    #[test]
    fn path_serializes_positions_and_cost() {
        let g = Graph::parse("S.G").unwrap();
        let mut engine = SearchEngine::new(&g, SearchConfig::instant());
        engine.run(Algorithm::BreadthFirst, &mut ManualClock::new(), &mut NoopObserver);
        let path = engine.path_to(g.goal().pos()).unwrap();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["cost"], 2);
        assert_eq!(json["positions"].as_array().map(Vec::len), Some(3));
    }
}
