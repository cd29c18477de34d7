//! Output locations and portable relative paths.

use std::path::{Component, Path, PathBuf};

/// Kotlin multiplatform source sets that receive a generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Common,
    Native,
    Jvm,
    Android,
}

impl Platform {
    /// Source set prefix, as in `<segment>Main`.
    pub fn segment(self) -> &'static str {
        match self {
            Platform::Common => "common",
            Platform::Native => "native",
            Platform::Jvm => "jvm",
            Platform::Android => "android",
        }
    }
}

/// Path of the Kotlin file holding `class_name` for `platform`:
/// `root/<platform>Main/kotlin/<package dirs>/<class_name>.kt`.
pub fn output_path(
    root: &Path,
    platform: Platform,
    package_name: &str,
    class_name: &str,
) -> PathBuf {
    let mut path = root
        .join(format!("{}Main", platform.segment()))
        .join("kotlin");
    for segment in package_name.split('.') {
        path.push(segment);
    }
    path.push(format!("{}.kt", class_name));
    path
}

/// Path of the JNI translation unit: `root/jni/binding.c`.
pub fn jni_binding_path(root: &Path) -> PathBuf {
    root.join("jni").join("binding.c")
}

/// Relative path from the directory `from` to `target`, joined with `/`.
///
/// Both paths are normalized lexically; the file system is never consulted.
/// Returns `.` when they are equal. If no relative path exists (one is
/// absolute and the other is not, or they sit on different prefixes) the
/// normalized `target` is returned instead.
pub fn relativize(from: &Path, target: &Path) -> String {
    let from = normalize(from);
    let target = normalize(target);

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    if anchor(&from_parts) != anchor(&target_parts) {
        return to_slash(&target);
    }

    let common = from_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for component in &from_parts[common..] {
        match component {
            Component::Normal(_) => parts.push("..".to_string()),
            // `from` climbs above the common ancestor; the depth is unknown.
            _ => return to_slash(&target),
        }
    }
    for component in &target_parts[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn anchor<'a>(parts: &[Component<'a>]) -> Vec<Component<'a>> {
    parts
        .iter()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .copied()
        .collect()
}

/// Fold `.` and `..` components without touching the file system.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// Render `path` with `/` between components.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    if out.is_empty() {
        ".".to_string()
    } else {
        out
    }
}
