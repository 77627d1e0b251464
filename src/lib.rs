//! Van Ginneken repeater (buffer) insertion over a routed signal net.
//!
//! The core is two calls: [`tree::build_tree`] turns a flat edge/sink list
//! into a rooted [`tree::Tree`], and [`engine::solve`] runs the dynamic
//! program that chooses where along that tree's edges to insert buffers so
//! that the required-arrival-time seen at the driver is maximized.
//!
//! Everything under [`io`] is ambient infrastructure (JSON ingestion of the
//! technology and net files, output regeneration) built around that core;
//! the `cli` feature additionally builds the `vg-repeater-insert` binary.

pub mod buffer;
pub mod cand;
pub mod engine;
pub mod error;
pub mod io;
pub mod merge;
pub mod params;
pub mod prune;
pub mod tree;
pub mod wire;

pub use cand::BufPlace;
pub use engine::{solve, Solution};
pub use error::{Error, Result};
pub use params::{BufferParams, WireParams};
pub use tree::{build_tree, Edge, Node, NodeKind, SinkSpec, Tree};
