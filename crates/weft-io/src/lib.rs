//! # weft-io
//!
//! Relax input/output contract, validation, and the load → relax → report
//! pipeline used by the CLI.
//!
//! Defines the boundary types external systems (CLI, stepping loops in
//! other processes, asset pipelines) use to talk to the constraint core.

pub mod contract;
pub mod files;
pub mod pipeline;
pub mod validator;

pub use contract::{RelaxConfig, RelaxInput, RelaxOutput};
pub use pipeline::run_relax;
pub use validator::validate_input;
