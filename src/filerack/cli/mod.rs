//! # CLI Layer
//!
//! One client of the rack among others. It is the only place that knows about
//! stdout, stderr and exit codes. Outside an editor there are no live
//! buffers, so captured input goes through an in-memory host.

mod commands;
mod render;
mod setup;

pub use commands::run;
