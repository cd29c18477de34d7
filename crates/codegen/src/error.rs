use std::path::PathBuf;

/// Errors raised while validating a grammar spec or producing its artifacts.
///
/// The engine itself only raises the validation variants. `ResourceMissing`
/// and `ArtifactSinkFailure` belong to the template loader and the file
/// writer that surround it; they live here so every caller shares one type.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// The class name, an accessor name or a native function name is not a
    /// valid identifier.
    #[error("{role} is not a valid identifier: {name:?}")]
    InvalidIdentifier { role: &'static str, name: String },

    /// The package name is not a dotted identifier.
    #[error("package name is not valid: {0:?}")]
    InvalidPackageName(String),

    /// The interop name is not a plain file name.
    #[error("interop name must be a plain file name: {0:?}")]
    InvalidInteropName(String),

    /// `language_methods` is empty, so there is nothing to bind.
    #[error("at least one language method is required")]
    NoLanguageMethods,

    /// A template could not be located or read.
    #[error("failed to read template '{name}': {reason}")]
    ResourceMissing { name: String, reason: String },

    /// A generated artifact could not be persisted.
    #[error("failed to write '{}': {source}", path.display())]
    ArtifactSinkFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    /// Build an [`CodegenError::ArtifactSinkFailure`] for `path`.
    pub fn sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::ArtifactSinkFailure {
            path: path.into(),
            source,
        }
    }
}
