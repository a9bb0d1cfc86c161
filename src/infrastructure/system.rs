use std::path::{Path, PathBuf};

/// Resolve a binary from an explicit path or the `PATH` environment variable
pub fn find_binary(bin: &str) -> Option<PathBuf> {
    if bin.contains(std::path::MAIN_SEPARATOR) {
        let p = PathBuf::from(bin);
        return if p.is_file() { Some(p) } else { None };
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(bin))
        .find(|candidate| candidate.is_file())
}

/// First binary of `candidates` found, preferring `preferred` when given
pub fn find_first_binary(preferred: Option<&str>, candidates: &[&str]) -> Option<PathBuf> {
    if let Some(bin) = preferred {
        if let Some(found) = find_binary(bin) {
            return Some(found);
        }
        tracing::warn!(binary = bin, "Preferred binary not found, trying defaults");
    }
    candidates.iter().find_map(|bin| find_binary(bin))
}

/// File name of a binary path, used to pick command-line flags
pub fn binary_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
