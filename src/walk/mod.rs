//! Weighted random walks over a `TransitionGraph`.
//!
//! `forward` synthesizes new progressions from the corpus statistics;
//! `backward` grows a path leftwards from a fixed ending chord.

pub mod backward;
pub mod forward;

pub use backward::build_backward_path;
pub use forward::build_progression;
