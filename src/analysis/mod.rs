//! The middle-end analyses this crate exists to teach: dominance,
//! dominance frontiers, natural loops, liveness, and local value numbering,
//! all built on one shared [`postorder`] traversal.

pub mod dom_frontiers;
pub mod dominators;
pub mod liveness;
pub mod loops;
pub mod lvn;
pub mod postorder;

pub use dom_frontiers::DominanceFrontiers;
pub use dominators::DominatorTree;
pub use liveness::LiveOut;
pub use loops::Loop;
