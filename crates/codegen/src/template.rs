//! `@NAME@` placeholder templates.
//!
//! Each artifact kind is rendered from one template. The built-in set is
//! compiled into the crate; callers that ship their own templates hand
//! them in through [`Templates::load`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::CodegenError;

/// Delimiter on both sides of a placeholder name.
pub const MARKER: char = '@';

/// The templates the generator renders, one per output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Common,
    Native,
    Jvm,
    Android,
    Jni,
    Build,
    Interop,
}

impl TemplateKind {
    /// All kinds, in generation order.
    pub const ALL: [TemplateKind; 7] = [
        TemplateKind::Common,
        TemplateKind::Native,
        TemplateKind::Jvm,
        TemplateKind::Android,
        TemplateKind::Jni,
        TemplateKind::Build,
        TemplateKind::Interop,
    ];

    /// File name of the template resource.
    pub fn resource_name(self) -> &'static str {
        match self {
            TemplateKind::Common => "common.kt.in",
            TemplateKind::Native => "native.kt.in",
            TemplateKind::Jvm => "jvm.kt.in",
            TemplateKind::Android => "android.kt.in",
            TemplateKind::Jni => "jni.c.in",
            TemplateKind::Build => "CMakeLists.txt.in",
            TemplateKind::Interop => "interop.def.in",
        }
    }

    /// Placeholders the generator substitutes for this kind.
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Common => &["PACKAGE", "CLASS", "METHODS"],
            TemplateKind::Native => &["PACKAGE", "CLASS", "IMPORTS", "METHODS"],
            TemplateKind::Jvm | TemplateKind::Android => {
                &["PACKAGE", "CLASS", "LIBRARY", "METHODS"]
            }
            TemplateKind::Jni => &["GRAMMAR", "FUNCTIONS"],
            TemplateKind::Build => &["LIBRARY", "INCLUDE", "SOURCES"],
            TemplateKind::Interop => &["PACKAGE", "GRAMMAR"],
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            TemplateKind::Common => include_str!("../templates/common.kt.in"),
            TemplateKind::Native => include_str!("../templates/native.kt.in"),
            TemplateKind::Jvm => include_str!("../templates/jvm.kt.in"),
            TemplateKind::Android => include_str!("../templates/android.kt.in"),
            TemplateKind::Jni => include_str!("../templates/jni.c.in"),
            TemplateKind::Build => include_str!("../templates/CMakeLists.txt.in"),
            TemplateKind::Interop => include_str!("../templates/interop.def.in"),
        }
    }
}

/// A complete set of template texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    common: String,
    native: String,
    jvm: String,
    android: String,
    jni: String,
    build: String,
    interop: String,
}

impl Templates {
    /// The templates shipped with this crate.
    pub fn builtin() -> Self {
        Self::from_fn(|kind| kind.builtin().to_string())
    }

    /// Build a set by asking `loader` for every kind.
    ///
    /// The first loader error aborts the whole set.
    pub fn load<F>(mut loader: F) -> Result<Self, CodegenError>
    where
        F: FnMut(TemplateKind) -> Result<String, CodegenError>,
    {
        Ok(Templates {
            common: loader(TemplateKind::Common)?,
            native: loader(TemplateKind::Native)?,
            jvm: loader(TemplateKind::Jvm)?,
            android: loader(TemplateKind::Android)?,
            jni: loader(TemplateKind::Jni)?,
            build: loader(TemplateKind::Build)?,
            interop: loader(TemplateKind::Interop)?,
        })
    }

    fn from_fn(mut f: impl FnMut(TemplateKind) -> String) -> Self {
        Templates {
            common: f(TemplateKind::Common),
            native: f(TemplateKind::Native),
            jvm: f(TemplateKind::Jvm),
            android: f(TemplateKind::Android),
            jni: f(TemplateKind::Jni),
            build: f(TemplateKind::Build),
            interop: f(TemplateKind::Interop),
        }
    }

    /// Template text for `kind`.
    pub fn get(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Common => &self.common,
            TemplateKind::Native => &self.native,
            TemplateKind::Jvm => &self.jvm,
            TemplateKind::Android => &self.android,
            TemplateKind::Jni => &self.jni,
            TemplateKind::Build => &self.build,
            TemplateKind::Interop => &self.interop,
        }
    }

    /// Placeholders used by the `kind` template that the generator will not
    /// substitute.
    pub fn unknown_placeholders(&self, kind: TemplateKind) -> Vec<String> {
        let known = kind.placeholders();
        placeholders(self.get(kind))
            .into_iter()
            .filter(|name| !known.contains(&name.as_str()))
            .collect()
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Replace every `@NAME@` in `template` whose name appears in
/// `substitutions`.
///
/// Rendering is a single left-to-right pass, so substituted text is never
/// scanned again. Unknown placeholders and stray markers are copied as-is.
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(MARKER) {
        out.push_str(&rest[..start]);
        let after = &rest[start + MARKER.len_utf8()..];
        let name_len = placeholder_name_len(after);
        let closed = after[name_len..].starts_with(MARKER);

        let value = if name_len > 0 && closed {
            let name = &after[..name_len];
            substitutions
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
        } else {
            None
        };

        match value {
            Some(value) => {
                out.push_str(value);
                rest = &after[name_len + MARKER.len_utf8()..];
            }
            None => {
                // The closing marker may open the next placeholder.
                out.push(MARKER);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Names of all `@NAME@` placeholders in `template`, sorted and deduplicated.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find(MARKER) {
        let after = &rest[start + MARKER.len_utf8()..];
        let name_len = placeholder_name_len(after);
        if name_len > 0 && after[name_len..].starts_with(MARKER) {
            found.insert(after[..name_len].to_string());
            rest = &after[name_len + MARKER.len_utf8()..];
        } else {
            rest = after;
        }
    }
    found
}

fn placeholder_name_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}
