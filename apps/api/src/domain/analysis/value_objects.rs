use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use uuid::Uuid;

/// Longest name most filesystems accept for one path component.
pub const MAX_FILENAME_BYTES: usize = 255;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

/// A client filename reduced to a single safe path component.
///
/// Non-ASCII characters are dropped, path separators and whitespace runs
/// become `_`, anything outside `[A-Za-z0-9_.-]` is removed and leading or
/// trailing `.`/`_` are stripped. Names past [`MAX_FILENAME_BYTES`] are cut
/// down, keeping the extension. The result never contains a separator and is
/// never `.` or `..`, so joining it onto a directory stays inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFilename(String);

impl SanitizedFilename {
    pub fn new(raw: &str) -> Self {
        let ascii: String = raw.chars().filter(char::is_ascii).collect();
        let spaced = ascii.replace(['/', '\\'], " ");
        let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
        let stripped = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
        let trimmed = stripped.trim_matches(|c: char| c == '.' || c == '_');

        if trimmed.is_empty() {
            Self(format!("upload-{}", Uuid::now_v7()))
        } else {
            Self(truncate_keeping_extension(trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Input is ASCII here, so byte offsets are char boundaries
fn truncate_keeping_extension(name: &str) -> String {
    if name.len() <= MAX_FILENAME_BYTES {
        return name.to_string();
    }
    match name.rfind('.') {
        Some(dot) if name.len() - dot < MAX_FILENAME_BYTES => {
            let ext = &name[dot..];
            format!("{}{}", &name[..MAX_FILENAME_BYTES - ext.len()], ext)
        }
        _ => name[..MAX_FILENAME_BYTES].to_string(),
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
