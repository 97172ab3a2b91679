//! # tac-flow-analysis
//!
//! A compiler middle-end analysis library for a toy three-address IR:
//! parse a textual CFG, then compute dominator trees (two independent
//! constructions), dominance frontiers, natural loops, LiveOut liveness,
//! and local value numbering over it.
//!
//! ```text
//! source text → ir::parser → ir::Cfg → analysis::*
//! ```
//!
//! Each analysis module stands on its own once you have a [`ir::Cfg`];
//! [`analysis::postorder`] is the one traversal everything else reuses.

pub mod analysis;
pub mod bitset;
#[cfg(feature = "cli")]
pub mod cli;
pub mod common;
pub mod ir;

pub use common::errors::{Error, ParseError, Result};
pub use ir::Cfg;
