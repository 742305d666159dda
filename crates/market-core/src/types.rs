//! Core domain types for the reward optimization engine.

pub mod history;
pub mod market;
pub mod order;

pub use history::*;
pub use market::*;
pub use order::*;
