pub mod canonical;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod graph;
pub mod modulation;
pub mod notes;
pub mod rng;
pub mod roots;
pub mod scales;
pub mod similarity;
pub mod walk;

/// Application name for XDG paths
pub const APP_NAME: &str = "chordgen";
