//! Virtual path and filename validation.
//!
//! Every mutating file or folder operation validates its path arguments here
//! before any backend call is issued.

/// Validate a virtual folder path.
///
/// The empty string denotes the root and is valid. Otherwise the path must
/// have no leading or trailing slash and no empty segments, and every
/// segment is restricted to alphanumerics, dash, underscore, dot, and space.
pub fn validate_path(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    if path.starts_with('/') || path.ends_with('/') {
        return false;
    }
    path.split('/').all(is_valid_segment)
}

/// Validate a single file or folder name.
///
/// Rejects empty names and any path separator.
pub fn validate_file_name(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    is_valid_segment(name)
}

/// Get the parent path of a full virtual path, `""` at the root.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Get the last segment of a virtual path.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

fn is_valid_segment(segment: &str) -> bool {
    if segment.trim().is_empty() {
        return false;
    }
    segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
}
