//! JNI symbol mangling.
//!
//! Exported native methods are looked up by the JVM under
//! `Java_<package>_<class>_<method>`, with each component escaped so that the
//! result is a valid C identifier.

use std::fmt::Write as _;

/// Escape `name` for use inside a JNI export symbol.
///
/// `_`, `;` and `[` become `_1`, `_2` and `_3`; any non-ASCII character
/// becomes `_0` followed by its code point as at least four lowercase hex
/// digits. Everything else is copied unchanged, including `.`.
pub fn mangle(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' => out.push_str("_1"),
            ';' => out.push_str("_2"),
            '[' => out.push_str("_3"),
            c if u32::from(c) > 0x7F => {
                // Writing into a String cannot fail.
                let _ = write!(out, "_0{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out
}

/// Mangle a dotted package name, then turn its dots into underscores.
///
/// The dot replacement must run after mangling: an underscore produced here
/// separates packages, while an underscore in the source is already `_1`.
pub fn mangle_package(package: &str) -> String {
    mangle(package).replace('.', "_")
}
