pub mod builder;
pub mod classify;
pub mod extract;
pub mod merge;
pub mod sink;
pub mod stats;
