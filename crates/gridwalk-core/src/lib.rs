//! **gridwalk-core** — foundational types for the *gridwalk* search
//! visualizer.
//!
//! This crate holds what the search engine and its renderers share but
//! which carries no search state: grid geometry, the pacing [`Clock`]
//! that spaces out observable steps, and the cooperative
//! [`CancelToken`].

pub mod cancel;
pub mod clock;
pub mod geom;

pub use cancel::CancelToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use geom::{Dims, Position};
