//! JSON ingestion of the technology and net files, and output regeneration.
//!
//! These are deliberately kept outside the core: the engine only ever sees
//! [`crate::params::WireParams`]/[`crate::params::BufferParams`] and a
//! [`crate::tree::Tree`] built from internal ids, never raw JSON.

pub mod net;
pub mod output;
pub mod technology;

pub use net::{load_net_file, NetFile};
pub use output::write_output_file;
pub use technology::{load_technology_file, TechFile};
