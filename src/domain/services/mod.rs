//! Domain services
//!
//! Core business logic services that operate on domain entities but need
//! no I/O of their own.

mod path_resolver;

pub use path_resolver::{resolve_path, PathResolver};
