//! Entity type definitions

pub mod chain;
pub mod contributor;

pub use chain::{build_chain, ToleranceChain};
pub use contributor::{Contributor, Direction, Distribution};
