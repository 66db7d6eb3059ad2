//! Stepped, observable graph search.
//!
//! [`SearchEngine`] runs breadth-first or uniform-cost search one expansion
//! per [`step`](SearchEngine::step). Between steps the visualization table
//! is consistent and may be read by a renderer; cancellation is only
//! observed at those boundaries. [`run`](SearchEngine::run) drives the
//! steps with a [`Clock`] and a [`SearchObserver`].

use gridwalk_core::{CancelToken, Clock, Position};
use log::{debug, trace, warn};

use crate::config::SearchConfig;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::node::NodeFlags;
use crate::visual::{CameFrom, Link, VisualState};

/// Sentinel cost for nodes the current search has not reached.
pub const UNREACHABLE: i32 = i32::MAX;

/// Search variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Unweighted, FIFO frontier.
    BreadthFirst,
    /// Dijkstra: frontier ordered by accumulated cost.
    UniformCost,
}

/// How a completed search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was dequeued.
    Found,
    /// The frontier ran dry without reaching the goal.
    NoPath,
}

/// Engine state: `Idle -> Running -> (Completed | Cancelled)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    #[default]
    Idle,
    Running(Algorithm),
    Completed(Outcome),
    Cancelled,
}

impl SearchStatus {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// Completed (either outcome) or cancelled.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed(_) | Self::Cancelled)
    }
}

/// Result of a single [`SearchEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A node was expanded; the search continues.
    Expanded(Position),
    /// The search is over (or was never started).
    Finished(SearchStatus),
}

/// Receives control after every search or path-trace step.
pub trait SearchObserver {
    fn on_step(&mut self, engine: &SearchEngine<'_>);
}

/// Observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_step(&mut self, _engine: &SearchEngine<'_>) {}
}

/// Working state of one running search.
#[derive(Debug)]
struct Run {
    algorithm: Algorithm,
    frontier: Frontier,
    current: Option<usize>,
    /// Nodes discovered by the previous expansion, demoted next step.
    neighbours: Vec<usize>,
}

/// Runs one search at a time over a borrowed [`Graph`].
#[derive(Debug)]
pub struct SearchEngine<'g> {
    pub(crate) graph: &'g Graph,
    pub(crate) config: SearchConfig,
    pub(crate) visual: VisualState,
    pub(crate) came_from: CameFrom,
    pub(crate) status: SearchStatus,
    cost: Vec<i32>,
    run: Option<Run>,
    cancel: CancelToken,
    steps: usize,
    nbuf: Vec<usize>,
}

impl<'g> SearchEngine<'g> {
    pub fn new(graph: &'g Graph, config: SearchConfig) -> Self {
        let len = graph.len();
        Self {
            graph,
            config,
            visual: VisualState::new(len),
            came_from: CameFrom::new(len),
            status: SearchStatus::Idle,
            cost: vec![UNREACHABLE; len],
            run: None,
            cancel: CancelToken::new(),
            steps: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Visualization flags of every node.
    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    /// Visualization flags at `pos`; empty outside the grid.
    pub fn flags(&self, pos: Position) -> NodeFlags {
        self.graph
            .index_of(pos)
            .map_or(NodeFlags::NONE, |i| self.visual.get(i))
    }

    /// Node the search reached `pos` from. `None` for the start and for
    /// nodes not reached.
    pub fn predecessor(&self, pos: Position) -> Option<Position> {
        let i = self.graph.index_of(pos)?;
        match self.came_from.get(i)? {
            Link::From(prev) => Some(self.graph.dims().position(prev)),
            Link::Root => None,
        }
    }

    /// Accumulated cost to `pos` (hop count for breadth-first).
    pub fn cost_so_far(&self, pos: Position) -> Option<i32> {
        let i = self.graph.index_of(pos)?;
        Some(self.cost[i]).filter(|&c| c != UNREACHABLE)
    }

    /// Nodes expanded by the current or last search.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// A handle that can cancel the running search from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Request cancellation. Takes effect before the next expansion.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Begin a search from the start node.
    ///
    /// Ignored (returns `false`) while another search is running. Otherwise
    /// previous flags, came-from links and any stale cancel request are
    /// cleared first.
    pub fn start(&mut self, algorithm: Algorithm) -> bool {
        if let SearchStatus::Running(active) = self.status {
            debug!("{algorithm:?} start ignored: {active:?} search already running");
            return false;
        }
        self.clear_search_state();
        self.cancel.clear();

        let start = self.graph.start_index();
        let mut frontier = match algorithm {
            Algorithm::BreadthFirst => Frontier::fifo(),
            Algorithm::UniformCost => Frontier::priority(),
        };
        frontier.push(start, 0);
        self.came_from.set(start, Link::Root);
        self.cost[start] = 0;

        self.run = Some(Run {
            algorithm,
            frontier,
            current: None,
            neighbours: Vec::new(),
        });
        self.status = SearchStatus::Running(algorithm);
        debug!(
            "{algorithm:?} search started at {} on {} grid",
            self.graph.start().pos(),
            self.graph.dims()
        );
        true
    }

    /// Advance the running search by one expansion.
    pub fn step(&mut self) -> Step {
        let Some(mut run) = self.run.take() else {
            return Step::Finished(self.status);
        };
        if self.cancel.is_cancelled() {
            return self.finish(run, SearchStatus::Cancelled);
        }

        let current = loop {
            match run.frontier.pop() {
                None => return self.finish(run, SearchStatus::Completed(Outcome::NoPath)),
                // Superseded by a cheaper entry that was already expanded.
                Some((i, cost)) if cost > self.cost[i] => continue,
                Some((i, _)) => break i,
            }
        };
        self.steps += 1;

        if let Some(prev) = run.current {
            self.visual.demote(prev);
        }
        for &n in &run.neighbours {
            self.visual.demote(n);
        }
        run.neighbours.clear();
        self.visual.remove(current, NodeFlags::FRONTIER);
        self.visual.insert(current, NodeFlags::CURRENT);
        run.current = Some(current);

        let pos = self.graph.dims().position(current);
        trace!("step {}: expanding {pos}", self.steps);

        if current == self.graph.goal_index() {
            return self.finish(run, SearchStatus::Completed(Outcome::Found));
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.graph.neighbours_into(current, &mut nbuf);
        for &n in &nbuf {
            if self.graph.nodes()[n].is_wall() {
                continue;
            }
            let new_cost = match run.algorithm {
                Algorithm::BreadthFirst => {
                    if self.came_from.contains(n) {
                        continue;
                    }
                    self.cost[current] + 1
                }
                Algorithm::UniformCost => {
                    let c = self.cost[current] + self.graph.cost(n);
                    if self.cost[n] != UNREACHABLE && c >= self.cost[n] {
                        continue;
                    }
                    c
                }
            };
            self.cost[n] = new_cost;
            self.came_from.set(n, Link::From(current));
            self.visual.insert(
                n,
                NodeFlags::NEIGHBOUR | NodeFlags::FRONTIER | NodeFlags::CAME_FROM_DIRECTION,
            );
            run.frontier.push(n, new_cost);
            run.neighbours.push(n);
        }
        self.nbuf = nbuf;

        self.run = Some(run);
        Step::Expanded(pos)
    }

    /// Start `algorithm` (or keep driving the search already running) and
    /// step it to the end, pausing `search_delay` between expansions.
    ///
    /// `observer` sees the engine after every step, including the final one.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        clock: &mut impl Clock,
        observer: &mut impl SearchObserver,
    ) -> SearchStatus {
        self.start(algorithm);
        loop {
            let step = self.step();
            observer.on_step(self);
            match step {
                Step::Expanded(_) => clock.sleep(self.config.search_delay),
                Step::Finished(status) => return status,
            }
        }
    }

    /// Clear every visualization flag and the came-from links, returning
    /// the engine to `Idle`. Refused while a search is running.
    pub fn reset_visualization_flags(&mut self) -> bool {
        if self.is_running() {
            warn!("reset refused: search still running");
            return false;
        }
        self.clear_search_state();
        self.status = SearchStatus::Idle;
        true
    }

    fn clear_search_state(&mut self) {
        self.visual.reset();
        self.came_from.clear();
        self.cost.fill(UNREACHABLE);
        self.steps = 0;
    }

    /// Leave no node current, queued or freshly discovered.
    fn finish(&mut self, mut run: Run, status: SearchStatus) -> Step {
        for &n in &run.neighbours {
            self.visual.demote(n);
        }
        if let Some(c) = run.current {
            self.visual.demote(c);
        }
        for n in run.frontier.drain() {
            self.visual.remove(n, NodeFlags::FRONTIER);
        }
        self.status = status;
        debug!("search finished: {status:?} after {} steps", self.steps);
        Step::Finished(status)
    }
}
