//! Artifact generation.
//!
//! One validated spec produces seven files: the common `expect` object, its
//! native, JVM and Android `actual` objects, the JNI translation unit, the
//! CMake build script and the cinterop definition. Every per-method block
//! follows the insertion order of `language_methods`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::mangle::{mangle, mangle_package};
use crate::paths::{self, Platform};
use crate::spec::ValidSpec;
use crate::template::{render, TemplateKind, Templates};

/// Separator between Kotlin declaration blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Where generated files go, derived from one output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `root` (typically `build/generated`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Kotlin source root: `<root>/src`.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// `<root>/CMakeLists.txt`.
    pub fn build_file(&self) -> PathBuf {
        self.root.join("CMakeLists.txt")
    }

    /// `<root>/src/nativeInterop/<interop_name>.def`.
    pub fn interop_file(&self, interop_name: &str) -> PathBuf {
        self.src_dir()
            .join("nativeInterop")
            .join(format!("{}.def", interop_name))
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: TemplateKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Render every artifact for `spec`.
///
/// Validation already happened, so this cannot fail; the result is fully
/// determined by its inputs.
pub fn generate(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
) -> Vec<GeneratedArtifact> {
    let _span = tracing::info_span!("generate", grammar = %spec.grammar_name).entered();

    let artifacts = vec![
        generate_common(spec, templates, layout),
        generate_native(spec, templates, layout),
        generate_managed(spec, templates, layout, Managed::Jvm),
        generate_managed(spec, templates, layout, Managed::Android),
        generate_jni_binding(spec, templates, layout),
        generate_build_file(spec, templates, layout),
        generate_interop(spec, templates, layout),
    ];

    for artifact in &artifacts {
        tracing::debug!(
            kind = ?artifact.kind,
            path = %artifact.path.display(),
            bytes = artifact.contents.len(),
            "rendered artifact"
        );
    }
    tracing::info!(count = artifacts.len(), "generated grammar bindings");

    artifacts
}

fn generate_common(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
) -> GeneratedArtifact {
    let methods = spec
        .language_methods
        .keys()
        .map(|method| format!("    fun {}(): Any", method))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    let kind = TemplateKind::Common;
    GeneratedArtifact {
        kind,
        path: class_file(spec, layout, Platform::Common),
        contents: render(
            templates.get(kind),
            &[
                ("PACKAGE", spec.package_name.as_str()),
                ("CLASS", spec.class_name.as_str()),
                ("METHODS", methods.as_str()),
            ],
        ),
    }
}

fn generate_native(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
) -> GeneratedArtifact {
    let imports = unique_functions(spec)
        .map(|function| format!("import {}.internal.{}", spec.package_name, function))
        .collect::<Vec<_>>()
        .join("\n");
    let methods = spec
        .language_methods
        .iter()
        .map(|(method, function)| format!("    actual fun {}(): Any = {}()!!", method, function))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    let kind = TemplateKind::Native;
    GeneratedArtifact {
        kind,
        path: class_file(spec, layout, Platform::Native),
        contents: render(
            templates.get(kind),
            &[
                ("PACKAGE", spec.package_name.as_str()),
                ("CLASS", spec.class_name.as_str()),
                ("IMPORTS", imports.as_str()),
                ("METHODS", methods.as_str()),
            ],
        ),
    }
}

/// Platforms whose objects load the JNI library.
#[derive(Debug, Clone, Copy)]
enum Managed {
    Jvm,
    Android,
}

impl Managed {
    fn platform(self) -> Platform {
        match self {
            Managed::Jvm => Platform::Jvm,
            Managed::Android => Platform::Android,
        }
    }

    fn kind(self) -> TemplateKind {
        match self {
            Managed::Jvm => TemplateKind::Jvm,
            Managed::Android => TemplateKind::Android,
        }
    }

    /// Annotations on each `external` declaration.
    fn annotations(self) -> &'static str {
        match self {
            Managed::Jvm => "    @JvmStatic\n",
            Managed::Android => "    @JvmStatic\n    @CriticalNative\n",
        }
    }
}

/// JVM and Android objects differ only in their template and in Android's
/// `@CriticalNative` annotation on the external declarations.
fn generate_managed(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
    managed: Managed,
) -> GeneratedArtifact {
    let kind = managed.kind();
    let annotations = managed.annotations();

    let mut declared = HashSet::new();
    let methods = spec
        .language_methods
        .iter()
        .map(|(method, function)| {
            let accessor = format!("    actual fun {}(): Any = {}()", method, function);
            if declared.insert(function.as_str()) {
                format!(
                    "{}\n\n{}    private external fun {}(): Long",
                    accessor, annotations, function
                )
            } else {
                accessor
            }
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    GeneratedArtifact {
        kind,
        path: class_file(spec, layout, managed.platform()),
        contents: render(
            templates.get(kind),
            &[
                ("PACKAGE", spec.package_name.as_str()),
                ("CLASS", spec.class_name.as_str()),
                ("LIBRARY", spec.library_name.as_str()),
                ("METHODS", methods.as_str()),
            ],
        ),
    }
}

fn generate_jni_binding(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
) -> GeneratedArtifact {
    let prefix = jni_prefix(&spec.package_name, &spec.class_name);
    let functions: String = unique_functions(spec)
        .map(|function| {
            format!(
                "NATIVE_FUNCTION({}{}) {{\n    return (jlong){}();\n}}\n",
                prefix,
                mangle(function),
                function
            )
        })
        .collect();

    let kind = TemplateKind::Jni;
    GeneratedArtifact {
        kind,
        path: paths::jni_binding_path(&layout.src_dir()),
        contents: render(
            templates.get(kind),
            &[
                ("GRAMMAR", spec.grammar_name.as_str()),
                ("FUNCTIONS", functions.as_str()),
            ],
        ),
    }
}

fn generate_build_file(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
) -> GeneratedArtifact {
    let path = layout.build_file();
    let here = path.parent().unwrap_or(layout.root());

    let binding = paths::jni_binding_path(&layout.src_dir());
    let sources = std::iter::once(paths::relativize(here, &binding))
        .chain(
            spec.source_files
                .iter()
                .map(|file| paths::relativize(here, &spec.base_dir.join(file))),
        )
        .collect::<Vec<_>>()
        .join(" ");
    let include = paths::relativize(here, &spec.base_dir.join("bindings").join("c"));

    let kind = TemplateKind::Build;
    GeneratedArtifact {
        kind,
        path,
        contents: render(
            templates.get(kind),
            &[
                ("LIBRARY", spec.library_name.as_str()),
                ("INCLUDE", include.as_str()),
                ("SOURCES", sources.as_str()),
            ],
        ),
    }
}

fn generate_interop(
    spec: &ValidSpec,
    templates: &Templates,
    layout: &OutputLayout,
) -> GeneratedArtifact {
    let kind = TemplateKind::Interop;
    GeneratedArtifact {
        kind,
        path: layout.interop_file(&spec.interop_name),
        contents: render(
            templates.get(kind),
            &[
                ("PACKAGE", spec.package_name.as_str()),
                ("GRAMMAR", spec.grammar_name.as_str()),
            ],
        ),
    }
}

/// `Java_<package>_<class>_`, the prefix of every exported JNI symbol.
pub fn jni_prefix(package_name: &str, class_name: &str) -> String {
    format!(
        "Java_{}_{}_",
        mangle_package(package_name),
        mangle(class_name)
    )
}

fn class_file(spec: &ValidSpec, layout: &OutputLayout, platform: Platform) -> PathBuf {
    paths::output_path(
        &layout.src_dir(),
        platform,
        &spec.package_name,
        &spec.class_name,
    )
}

/// Native function names in first-seen order, without repeats.
fn unique_functions(spec: &ValidSpec) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    spec.language_methods
        .values()
        .map(String::as_str)
        .filter(move |function| seen.insert(*function))
}
