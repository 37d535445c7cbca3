//! Output file path derivation

use std::path::{Path, PathBuf};

use super::settings::AudioFormat;

/// Name used when the recording name field is empty
pub const DEFAULT_RECORDING_NAME: &str = "MyAudioCat";

/// Resolve the output file for a recording.
///
/// Returns `documents_dir/<name>.<ext>`, using [`DEFAULT_RECORDING_NAME`] for an
/// empty name. Separators and NUL inside the name become `_` so the file always
/// lands directly in `documents_dir`. An existing file at the path is not
/// checked for; the recorder overwrites it.
pub fn resolve_file_path(name: &str, documents_dir: &Path, format: AudioFormat) -> PathBuf {
    let stem = if name.is_empty() {
        DEFAULT_RECORDING_NAME.to_string()
    } else {
        sanitize(name)
    };

    documents_dir.join(format!("{}.{}", stem, format.extension()))
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();

    // "." and ".." would escape or alias the directory once joined
    match cleaned.as_str() {
        "." | ".." => cleaned.replace('.', "_"),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> PathBuf {
        PathBuf::from("/home/user/Documents")
    }

    #[test]
    fn empty_name_uses_default() {
        let path = resolve_file_path("", &docs(), AudioFormat::Aac);
        assert!(path.ends_with("MyAudioCat.m4a"));
        assert_eq!(path, docs().join("MyAudioCat.m4a"));
    }

    #[test]
    fn named_recording() {
        let path = resolve_file_path("Interview1", &docs(), AudioFormat::Aac);
        assert!(path.ends_with("Interview1.m4a"));
        assert_eq!(path.parent(), Some(docs().as_path()));
    }

    #[test]
    fn whitespace_name_is_kept() {
        let path = resolve_file_path("team sync", &docs(), AudioFormat::Aac);
        assert_eq!(path, docs().join("team sync.m4a"));
    }

    #[test]
    fn flac_extension() {
        let path = resolve_file_path("take", &docs(), AudioFormat::Flac);
        assert!(path.ends_with("take.flac"));
    }

    #[test]
    fn separators_do_not_escape_directory() {
        for name in ["../secret", "a/b", "a\\b", "nul\0byte", "..", "."] {
            let path = resolve_file_path(name, &docs(), AudioFormat::Aac);
            assert_eq!(path.parent(), Some(docs().as_path()), "name {:?}", name);
            let file_name = path.file_name().unwrap().to_string_lossy().to_string();
            assert!(!file_name.contains('/'));
            assert!(!file_name.contains('\\'));
            assert!(!file_name.contains('\0'));
            assert!(file_name.ends_with(".m4a"));
        }
    }

    #[test]
    fn dot_names_are_replaced() {
        let path = resolve_file_path("..", &docs(), AudioFormat::Aac);
        assert_eq!(path, docs().join("__.m4a"));
    }
}
