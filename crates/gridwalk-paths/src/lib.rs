//! Observable, stepped graph search on small grids.
//!
//! A [`Graph`] is generated once (walls, start and goal included) and then
//! searched by a [`SearchEngine`], which expands one node per step so a
//! renderer can show every intermediate state:
//!
//! - **Breadth-first** ([`Algorithm::BreadthFirst`]): FIFO frontier.
//! - **Uniform-cost** ([`Algorithm::UniformCost`]): Dijkstra over node
//!   weights, ties broken by discovery order.
//!
//! Per-node search state lives in the engine's [`VisualState`], not in the
//! graph. After a search, [`SearchEngine::path_to`] and
//! [`SearchEngine::reconstruct`] walk the came-from links back from a
//! target.
//!
//! # Pacing
//!
//! | Entry point | Pauses with |
//! |---|---|
//! | [`SearchEngine::step`] | nothing; the caller decides |
//! | [`SearchEngine::run`] | [`SearchConfig::search_delay`] per expansion |
//! | [`SearchEngine::reconstruct`] | [`SearchConfig::path_delay`] per node |

mod config;
mod engine;
mod frontier;
mod graph;
mod layout;
mod node;
mod path;
mod visual;

pub use config::{DEFAULT_PATH_DELAY, DEFAULT_SEARCH_DELAY, SearchConfig};
pub use engine::{
    Algorithm, NoopObserver, Outcome, SearchEngine, SearchObserver, SearchStatus, Step, UNREACHABLE,
};
pub use graph::{Graph, GraphError, MAX_NODES};
pub use layout::Layout;
pub use node::{GridNode, NodeFlags, label};
pub use path::{Path, PathError};
pub use visual::VisualState;
