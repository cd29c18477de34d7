//! Source generation for KTreeSitter grammar bindings.
//!
//! Given a [`GrammarSpec`] describing one tree-sitter grammar, this crate
//! renders the Kotlin multiplatform sources, JNI glue, CMake script and
//! cinterop definition that expose the grammar's language functions to
//! KTreeSitter. The crate performs no I/O: templates come in as text and
//! artifacts go out as `(path, contents)` values.
//!
//! ```
//! use ktreesitter_codegen::{generate, GrammarSpec, OutputLayout, Templates};
//! use ktreesitter_codegen::spec::{default_language_methods, default_library_name};
//!
//! let spec = GrammarSpec {
//!     base_dir: "/repo".into(),
//!     grammar_name: "foo".to_string(),
//!     source_files: vec!["src/parser.c".into()],
//!     interop_name: "grammar".to_string(),
//!     library_name: default_library_name("foo"),
//!     package_name: "com.example".to_string(),
//!     class_name: "Foo".to_string(),
//!     language_methods: default_language_methods("foo"),
//! }
//! .validate()?;
//!
//! let artifacts = generate(&spec, &Templates::builtin(), &OutputLayout::new("/repo/build"));
//! assert_eq!(artifacts.len(), 7);
//! # Ok::<(), ktreesitter_codegen::CodegenError>(())
//! ```

pub mod error;
pub mod generate;
pub mod ident;
pub mod mangle;
pub mod paths;
pub mod spec;
pub mod template;

pub use error::CodegenError;
pub use generate::{generate, GeneratedArtifact, OutputLayout};
pub use ident::{is_valid_dotted_identifier, is_valid_identifier};
pub use mangle::{mangle, mangle_package};
pub use spec::{validate, GrammarSpec, ValidSpec};
pub use template::{render, TemplateKind, Templates};
