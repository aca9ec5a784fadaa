pub mod engine;
/// Run summary derived from recorded ticks.
pub mod summary;
/// Fixed-interval time vector.
pub mod time_vector;
pub mod types;
