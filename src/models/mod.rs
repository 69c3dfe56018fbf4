// Models module for data structures
pub mod cancellation;
pub mod entry;
pub mod requirement;
