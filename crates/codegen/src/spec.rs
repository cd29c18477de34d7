//! The grammar binding description and its validation.

use std::path::PathBuf;

use indexmap::IndexMap;
use crate::error::CodegenError;
use crate::ident::{is_valid_dotted_identifier, is_valid_identifier};

/// Interop descriptor stem used when none is configured.
pub const DEFAULT_INTEROP_NAME: &str = "grammar";

/// Base directory used when none is configured, relative to the project.
pub const DEFAULT_BASE_DIR: &str = "../..";

/// `ktreesitter-<grammar_name>`.
pub fn default_library_name(grammar_name: &str) -> String {
    format!("ktreesitter-{}", grammar_name)
}

/// A single `language` accessor bound to `tree_sitter_<grammar_name>`.
pub fn default_language_methods(grammar_name: &str) -> IndexMap<String, String> {
    let mut methods = IndexMap::new();
    methods.insert(
        "language".to_string(),
        format!("tree_sitter_{}", grammar_name),
    );
    methods
}

/// Everything needed to generate the bindings for one grammar.
///
/// Defaults are resolved before this value is built; the engine treats every
/// field as final. `language_methods` keeps insertion order, which decides
/// the order of accessors and exported symbols in every artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSpec {
    /// Root of the grammar repository.
    pub base_dir: PathBuf,
    pub grammar_name: String,
    /// C sources to compile, relative to `base_dir` unless absolute.
    pub source_files: Vec<PathBuf>,
    pub interop_name: String,
    pub library_name: String,
    pub package_name: String,
    pub class_name: String,
    /// Accessor name to native function name.
    pub language_methods: IndexMap<String, String>,
}

impl GrammarSpec {
    /// Check every identifier invariant, failing on the first violation.
    pub fn validate(self) -> Result<ValidSpec, CodegenError> {
        if !is_valid_dotted_identifier(&self.package_name) {
            return Err(CodegenError::InvalidPackageName(self.package_name));
        }
        check_identifier("class name", &self.class_name)?;
        if !is_plain_file_name(&self.interop_name) {
            return Err(CodegenError::InvalidInteropName(self.interop_name));
        }
        if self.language_methods.is_empty() {
            return Err(CodegenError::NoLanguageMethods);
        }
        for (method, function) in &self.language_methods {
            check_identifier("method name", method)?;
            check_identifier("native function name", function)?;
        }
        Ok(ValidSpec(self))
    }
}

/// Shorthand for [`GrammarSpec::validate`].
pub fn validate(spec: GrammarSpec) -> Result<ValidSpec, CodegenError> {
    spec.validate()
}

fn check_identifier(role: &'static str, name: &str) -> Result<(), CodegenError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(CodegenError::InvalidIdentifier {
            role,
            name: name.to_string(),
        })
    }
}

/// `interop_name` becomes `<interop_name>.def`, so it must not leave the
/// interop directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// A [`GrammarSpec`] that passed validation.
///
/// Only [`GrammarSpec::validate`] constructs this, so holding one proves the
/// identifier invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSpec(GrammarSpec);

impl ValidSpec {
    pub fn spec(&self) -> &GrammarSpec {
        &self.0
    }

    pub fn into_inner(self) -> GrammarSpec {
        self.0
    }
}

impl std::ops::Deref for ValidSpec {
    type Target = GrammarSpec;

    fn deref(&self) -> &GrammarSpec {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_spec() -> GrammarSpec {
        GrammarSpec {
            base_dir: PathBuf::from("/repo"),
            grammar_name: "foo".to_string(),
            source_files: vec![PathBuf::from("src/parser.c")],
            interop_name: DEFAULT_INTEROP_NAME.to_string(),
            library_name: default_library_name("foo"),
            package_name: "com.example".to_string(),
            class_name: "Foo".to_string(),
            language_methods: default_language_methods("foo"),
        }
    }

    #[test]
    fn test_valid_spec_passes() {
        let valid = make_spec().validate().unwrap();
        assert_eq!(valid.class_name, "Foo");
        assert_eq!(valid.library_name, "ktreesitter-foo");
        assert_eq!(valid.language_methods["language"], "tree_sitter_foo");
    }

    #[test]
    fn test_invalid_package() {
        let mut spec = make_spec();
        spec.package_name = "com..example".to_string();
        match spec.validate() {
            Err(CodegenError::InvalidPackageName(name)) => assert_eq!(name, "com..example"),
            other => panic!("expected InvalidPackageName, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_class_name() {
        let mut spec = make_spec();
        spec.class_name = "1Foo".to_string();
        match spec.validate() {
            Err(CodegenError::InvalidIdentifier { role, name }) => {
                assert_eq!(role, "class name");
                assert_eq!(name, "1Foo");
            }
            other => panic!("expected InvalidIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_method_key_and_value() {
        let mut spec = make_spec();
        spec.language_methods
            .insert("bad-name".to_string(), "tree_sitter_foo".to_string());
        assert!(matches!(
            spec.validate(),
            Err(CodegenError::InvalidIdentifier { role: "method name", .. })
        ));

        let mut spec = make_spec();
        spec.language_methods
            .insert("other".to_string(), "tree-sitter".to_string());
        assert!(matches!(
            spec.validate(),
            Err(CodegenError::InvalidIdentifier { role: "native function name", ref name })
                if name == "tree-sitter"
        ));
    }

    #[test]
    fn test_interop_name_must_stay_in_its_directory() {
        for bad in ["", "..", "../../../escaped", "nested/grammar", "win\\grammar"] {
            let mut spec = make_spec();
            spec.interop_name = bad.to_string();
            assert!(
                matches!(spec.validate(), Err(CodegenError::InvalidInteropName(ref n)) if n == bad),
                "accepted {:?}",
                bad
            );
        }

        let mut spec = make_spec();
        spec.interop_name = "tree-sitter-foo".to_string();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_empty_methods_rejected() {
        let mut spec = make_spec();
        spec.language_methods.clear();
        assert!(matches!(spec.validate(), Err(CodegenError::NoLanguageMethods)));
    }

    #[test]
    fn test_grammar_name_is_not_an_identifier() {
        let mut spec = make_spec();
        spec.grammar_name = "c-sharp".to_string();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_error_message_names_offender() {
        let mut spec = make_spec();
        spec.class_name = "Foo Bar".to_string();
        let err = spec.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "class name is not a valid identifier: \"Foo Bar\""
        );
    }
}
