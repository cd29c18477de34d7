//! Grammar configuration format for `ktreesitter generate`.
//!
//! The configuration TOML describes one grammar binding. Everything except
//! the grammar name, source files, package and class has a default.
//!
//! # Example
//!
//! ```toml
//! [grammar]
//! name = "java"
//! files = ["src/parser.c"]
//! package_name = "io.github.treesitter.ktreesitter.java"
//! class_name = "TreeSitterJava"
//!
//! # Optional
//! base_dir = "../.."
//! interop_name = "grammar"
//! library_name = "ktreesitter-java"
//!
//! [grammar.language_methods]
//! language = "tree_sitter_java"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use ktreesitter_codegen::paths::normalize;
use ktreesitter_codegen::spec::{
    default_language_methods, default_library_name, DEFAULT_BASE_DIR, DEFAULT_INTEROP_NAME,
};
use ktreesitter_codegen::GrammarSpec;
use serde::Deserialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Errors reading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub grammar: GrammarConfig,
}

/// `[grammar]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    /// Grammar name, as in `tree-sitter-<name>`.
    pub name: String,
    /// Grammar repository root, relative to the configuration file.
    pub base_dir: Option<PathBuf>,
    /// C sources, relative to `base_dir`.
    pub files: Vec<PathBuf>,
    pub interop_name: Option<String>,
    pub library_name: Option<String>,
    pub package_name: String,
    pub class_name: String,
    /// Accessor name to C function name, in declaration order.
    pub language_methods: Option<IndexMap<String, String>>,
}

impl GrammarConfig {
    /// Resolve defaults into a [`GrammarSpec`].
    ///
    /// `config_dir` is the directory containing the configuration file and
    /// anchors a relative `base_dir`.
    pub fn into_spec(self, config_dir: &Path) -> GrammarSpec {
        let base_dir = self
            .base_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));
        let library_name = self
            .library_name
            .unwrap_or_else(|| default_library_name(&self.name));
        let language_methods = self
            .language_methods
            .unwrap_or_else(|| default_language_methods(&self.name));

        GrammarSpec {
            base_dir: normalize(&config_dir.join(base_dir)),
            source_files: self.files,
            interop_name: self
                .interop_name
                .unwrap_or_else(|| DEFAULT_INTEROP_NAME.to_string()),
            library_name,
            package_name: self.package_name,
            class_name: self.class_name,
            language_methods,
            grammar_name: self.name,
        }
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Parse configuration text; `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<GrammarConfig, ConfigError> {
    toml::from_str::<ConfigFile>(content)
        .map(|file| file.grammar)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read the configuration file at `path` and resolve it into a spec.
///
/// `path` must be absolute so that the base directory is absolute too.
pub fn load_spec(path: &Path) -> Result<GrammarSpec, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content, path)?;
    let config_dir = path.parent().unwrap_or_else(|| Path::new("/"));
    tracing::debug!(path = %path.display(), grammar = %config.name, "loaded configuration");
    Ok(config.into_spec(config_dir))
}

/// Make `path` absolute against the working directory, lexically normalized.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}
