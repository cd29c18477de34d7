//! Integration tests for the grammar binding generation pipeline.
//!
//! These tests drive the public API from a raw `GrammarSpec` through
//! validation to the full artifact list, using the built-in templates.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use ktreesitter_codegen::{
    generate, CodegenError, GeneratedArtifact, GrammarSpec, OutputLayout, TemplateKind, Templates,
};

fn make_spec(methods: &[(&str, &str)]) -> GrammarSpec {
    GrammarSpec {
        base_dir: PathBuf::from("/work/tree-sitter-foo"),
        grammar_name: "foo".to_string(),
        source_files: vec![
            PathBuf::from("src/parser.c"),
            PathBuf::from("src/scanner.c"),
        ],
        interop_name: "grammar".to_string(),
        library_name: "ktreesitter-foo".to_string(),
        package_name: "com.example".to_string(),
        class_name: "Foo".to_string(),
        language_methods: methods
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<IndexMap<_, _>>(),
    }
}

fn layout() -> OutputLayout {
    OutputLayout::new("/work/tree-sitter-foo/bindings/kotlin/build/generated")
}

fn run(spec: GrammarSpec) -> Vec<GeneratedArtifact> {
    let valid = spec.validate().expect("spec should validate");
    generate(&valid, &Templates::builtin(), &layout())
}

fn contents(artifacts: &[GeneratedArtifact], kind: TemplateKind) -> &str {
    &artifacts
        .iter()
        .find(|a| a.kind == kind)
        .unwrap_or_else(|| panic!("missing {:?}", kind))
        .contents
}

#[test]
fn test_end_to_end_single_language() {
    let artifacts = run(make_spec(&[("language", "tree_sitter_foo")]));
    assert_eq!(artifacts.len(), 7);

    let common = contents(&artifacts, TemplateKind::Common);
    assert_eq!(
        common.matches("fun ").count(),
        1,
        "common declaration should have exactly one accessor"
    );
    assert!(common.contains("    fun language(): Any"));
    assert!(common.starts_with("package com.example\n"));

    let jvm = contents(&artifacts, TemplateKind::Jvm);
    assert!(
        jvm.contains("private external fun tree_sitter_foo(): Long"),
        "JVM object should declare the foreign import"
    );

    let jni = contents(&artifacts, TemplateKind::Jni);
    assert_eq!(jni.matches("NATIVE_FUNCTION(Java_").count(), 1);
    assert!(jni.contains("NATIVE_FUNCTION(Java_com_example_Foo_tree_1sitter_1foo) {"));
    assert!(jni.contains("return (jlong)tree_sitter_foo();"));

    let cmake = contents(&artifacts, TemplateKind::Build);
    assert!(cmake.contains("project(ktreesitter-foo LANGUAGES C)"));
    assert!(cmake.contains(
        "SHARED src/jni/binding.c ../../../../src/parser.c ../../../../src/scanner.c)"
    ));
    assert!(cmake.contains("${JNI_INCLUDE_DIRS} ../../../c)"));

    let def = contents(&artifacts, TemplateKind::Interop);
    assert!(def.contains("package = com.example.internal"));
    assert!(def.contains("tree_sitter_foo"));
}

#[test]
fn test_generation_is_deterministic() {
    let spec = make_spec(&[("language", "tree_sitter_foo"), ("other", "other_language")]);
    let first = run(spec.clone());
    let second = run(spec);
    assert_eq!(first, second, "identical specs should render identical artifacts");
}

#[test]
fn test_method_order_drives_output_order() {
    let forward = run(make_spec(&[("alpha", "alpha_lang"), ("beta", "beta_lang")]));
    let reversed = run(make_spec(&[("beta", "beta_lang"), ("alpha", "alpha_lang")]));

    for kind in [
        TemplateKind::Common,
        TemplateKind::Native,
        TemplateKind::Jvm,
        TemplateKind::Android,
        TemplateKind::Jni,
    ] {
        let f = contents(&forward, kind);
        let r = contents(&reversed, kind);
        assert_ne!(f, r, "{:?} should depend on method order", kind);
        assert_eq!(f.len(), r.len(), "{:?} should only be reordered", kind);
        assert!(f.find("alpha").unwrap() < f.find("beta").unwrap());
        assert!(r.find("beta").unwrap() < r.find("alpha").unwrap());
    }

    // Sorting the lines of each artifact hides pure reordering.
    for kind in [TemplateKind::Common, TemplateKind::Native, TemplateKind::Jni] {
        let mut f: Vec<_> = contents(&forward, kind).lines().collect();
        let mut r: Vec<_> = contents(&reversed, kind).lines().collect();
        f.sort_unstable();
        r.sort_unstable();
        assert_eq!(f, r, "{:?} should differ only in order", kind);
    }

    for kind in [TemplateKind::Build, TemplateKind::Interop] {
        assert_eq!(contents(&forward, kind), contents(&reversed, kind));
    }
}

#[test]
fn test_exported_symbols_follow_method_order() {
    let artifacts = run(make_spec(&[
        ("language", "tree_sitter_foo"),
        ("languageEmbedded", "tree_sitter_foo_embedded"),
    ]));
    let jni = contents(&artifacts, TemplateKind::Jni);
    let symbols: Vec<_> = jni
        .lines()
        .filter_map(|line| line.strip_prefix("NATIVE_FUNCTION("))
        .filter_map(|rest| rest.split(')').next())
        .filter(|name| name.starts_with("Java_"))
        .collect();
    assert_eq!(
        symbols,
        vec![
            "Java_com_example_Foo_tree_1sitter_1foo",
            "Java_com_example_Foo_tree_1sitter_1foo_1embedded",
        ]
    );
}

#[test]
fn test_package_with_underscore_is_mangled_before_dots() {
    let mut spec = make_spec(&[("language", "tree_sitter_foo")]);
    spec.package_name = "a_b.c".to_string();
    let artifacts = run(spec);
    let jni = contents(&artifacts, TemplateKind::Jni);
    assert!(jni.contains("Java_a_1b_c_Foo_tree_1sitter_1foo"));
    assert!(!jni.contains("Java_a_1b_1c_"));
}

#[test]
fn test_non_ascii_class_name() {
    let mut spec = make_spec(&[("language", "tree_sitter_foo")]);
    spec.class_name = "Caf\u{e9}".to_string();
    let artifacts = run(spec);
    let jni = contents(&artifacts, TemplateKind::Jni);
    assert!(jni.contains("Java_com_example_Caf_000e9_tree_1sitter_1foo"));
    assert!(artifacts[0]
        .path
        .ends_with(Path::new("com/example/Caf\u{e9}.kt")));
}

#[test]
fn test_validation_fails_before_generation() {
    let mut spec = make_spec(&[("language", "tree_sitter_foo")]);
    spec.package_name = ".com.example".to_string();
    assert!(matches!(
        spec.validate(),
        Err(CodegenError::InvalidPackageName(ref name)) if name == ".com.example"
    ));

    let spec = make_spec(&[]);
    assert!(matches!(
        spec.validate(),
        Err(CodegenError::NoLanguageMethods)
    ));
}

#[test]
fn test_absolute_source_files_are_kept() {
    let mut spec = make_spec(&[("language", "tree_sitter_foo")]);
    spec.source_files = vec![PathBuf::from("/elsewhere/parser.c")];
    let artifacts = run(spec);
    let cmake = contents(&artifacts, TemplateKind::Build);
    assert!(cmake.contains("SHARED src/jni/binding.c ../../../../../../elsewhere/parser.c)"));
}

#[test]
fn test_artifacts_serialize_for_reports() {
    let artifacts = run(make_spec(&[("language", "tree_sitter_foo")]));
    let json = serde_json::to_value(&artifacts).expect("serialize");
    assert_eq!(json[0]["kind"], "common");
    assert_eq!(json[5]["kind"], "build");
    assert!(json[4]["path"]
        .as_str()
        .unwrap()
        .ends_with("src/jni/binding.c"));
}
