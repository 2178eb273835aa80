//! Repositories for the data access layer
//
// Clip metadata document
pub mod clip;

pub use clip::ClipRepository;
