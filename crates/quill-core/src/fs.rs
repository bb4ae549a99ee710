use std::path::Path;
use std::path::PathBuf;

/// Suffix of the declaration files written by the upstream parsers.
pub const DECLARATION_FILE_SUFFIX: &str = ".quill.json";

/// Whether `path` looks like a declaration file, e.g. `src/index.quill.json`.
pub fn has_declaration_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(DECLARATION_FILE_SUFFIX))
}

/// Make `path` absolute and drop `.` components, without touching the
/// filesystem.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute.components().collect()
}

/// Path relative to the current working directory if it is below it,
/// otherwise the path unchanged, as a string for display.
pub fn relativize_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    let Ok(cwd) = std::env::current_dir() else {
        return path.display().to_string();
    };

    let absolute = normalize_path(path);
    match absolute.strip_prefix(normalize_path(&cwd)) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}
