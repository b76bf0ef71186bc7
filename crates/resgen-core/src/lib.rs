pub mod config;
pub mod emitter;
pub mod error;
pub mod generate;
pub mod naming;
pub mod roots;
pub mod tree;

use std::path::PathBuf;

pub use emitter::{Emitter, EmitterProvider, EmitterRegistry, EmitterState, ResourceConstant};
pub use generate::{GenerationReport, Generator};

/// A generated file, with its path relative to the output directory.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}
