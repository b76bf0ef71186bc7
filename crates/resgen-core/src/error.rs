use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not a valid package name")]
    InvalidPackage(String),

    #[error("{0} is not a valid class name")]
    InvalidClassName(String),

    #[error("{0} is not a valid contract type name")]
    InvalidContract(String),

    #[error("unknown emitter: {0}")]
    UnknownEmitter(String),

    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("symbolic link cycle at {} (points back to {})", .path.display(), .ancestor.display())]
    Cycle { path: PathBuf, ancestor: PathBuf },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl From<walkdir::Error> for TreeError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        if let Some(ancestor) = err.loop_ancestor() {
            return TreeError::Cycle {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("directory walk failed"));
        TreeError::Io { path, source }
    }
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to render {type_name}: {message}")]
    Render { type_name: String, message: String },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not below its resource root", .path.display())]
    OutsideRoot { path: PathBuf },
}
