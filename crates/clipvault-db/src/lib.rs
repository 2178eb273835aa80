//! ClipVault metadata store
//!
//! Clip records live in a single JSON document on disk. This crate owns reading and
//! rewriting that document.

pub mod db;

pub use db::ClipRepository;
