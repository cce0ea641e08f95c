/// Run configuration and the parallel row pipeline
pub mod executor;
/// Per-row union-find linkage arena
pub mod linkage;
/// Character assignment for solved rows
pub mod pattern;
/// Depth to separation mapping
pub mod separation;
/// Row constraint solver and conflict policies
pub mod solver;
