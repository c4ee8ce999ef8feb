/// Maneuver board slots and their binding to loaded planes
pub mod board;
/// The master maneuver catalog
pub mod catalog;
/// Plane documents and the model owning loaded planes
pub mod document;
/// Error definitions
pub mod error;
/// Maneuver names, directions and tolerances
pub mod game_types;
/// Generic wrapper for values that may or may not parse into a known type.
pub mod recognized;
