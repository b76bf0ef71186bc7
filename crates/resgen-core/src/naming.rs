//! Identifier derivation for generated constants and nested types.
//!
//! Constants and types follow two different rules:
//! - constants (`my-file.v2.png` → `MY_FILE_V2`) come from file names,
//! - types (`sub-dir` → `SubDir`) come from directory and module names.

use std::path::Path;

/// Words that may not be used as a generated class name in Java.
pub const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "null", "package", "private", "protected", "public", "return",
    "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

/// Kotlin hard keywords.
pub const KOTLIN_RESERVED: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

const UNNAMED_CONSTANT: &str = "UNNAMED";
const UNNAMED_TYPE: &str = "Unnamed";

/// Derive the constant identifier for a resource file name.
///
/// Non-word runs become a single `_`, a leading digit gets an `_` prefix and
/// the result is upper-cased. The extension is dropped unless `keep_extension`.
pub fn constant_name(file_name: &str, keep_extension: bool) -> String {
    let base = if keep_extension {
        file_name
    } else {
        file_stem(file_name)
    };

    let mut name = String::with_capacity(base.len() + 1);
    for ch in base.chars() {
        let ch = if ch.is_ascii_alphanumeric() { ch } else { '_' };
        if ch == '_' && name.ends_with('_') {
            continue;
        }
        name.push(ch);
    }

    if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
        return UNNAMED_CONSTANT.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    name.to_ascii_uppercase()
}

/// Disambiguate `name` against identifiers already taken at the same level.
///
/// A taken name gets `_` plus the upper-cased extension appended. Returns the
/// chosen identifier and whether it still collides; two files sharing both a
/// stem and an extension are not made unique.
pub fn resolve_collision(
    name: String,
    file_name: &str,
    taken: impl Fn(&str) -> bool,
) -> (String, bool) {
    if !taken(&name) {
        return (name, false);
    }

    let suffixed = format!("{name}_{}", extension(file_name).to_ascii_uppercase());
    let collides = taken(&suffixed);
    (suffixed, collides)
}

/// Disambiguate a nested type name by appending the first free number,
/// starting at `2`.
pub fn resolve_type_collision(name: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&name) {
        return name;
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{name}{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Derive a type name for a directory or module name.
///
/// The first character is capitalized, characters other than letters and
/// digits are dropped, and each dropped separator upper-cases the next kept
/// character. A leading digit gets an `_` prefix.
pub fn type_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len() + 1);
    let mut upper_next = true;

    for ch in raw.chars() {
        if !ch.is_alphanumeric() {
            upper_next = true;
            continue;
        }
        if upper_next {
            name.extend(ch.to_uppercase());
        } else {
            name.push(ch);
        }
        upper_next = false;
    }

    if name.is_empty() {
        return UNNAMED_TYPE.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` is usable as the base class name in every built-in target.
pub fn is_valid_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let head_ok = first.is_ascii_alphabetic() || first == '_' || first == '$';
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    head_ok && tail_ok && !JAVA_RESERVED.contains(&name) && !KOTLIN_RESERVED.contains(&name)
}

/// Whether `name` is a valid package: two or more dot-separated lowercase
/// segments, the first one starting with a letter and none of them a keyword.
pub fn is_valid_package(name: &str) -> bool {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() < 2 {
        return false;
    }
    if !segments[0].starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }
    segments.iter().all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            && !JAVA_RESERVED.contains(segment)
            && !KOTLIN_RESERVED.contains(segment)
    })
}

/// Whether `name` is a dotted sequence of identifiers, e.g. `resgen.api.Resource`.
pub fn is_valid_qualified_name(name: &str) -> bool {
    name.split('.').all(|segment| {
        segment.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// File name without its final extension. Dot files (`.gitignore`) have none.
fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

fn extension(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}
