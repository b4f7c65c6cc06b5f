//! Filters applied to files discovered by a recursive walk.
//!
//! Paths named explicitly on the command line bypass these checks.
use glob::Pattern;
use std::path::Path;

/// Extensions that are skipped during recursive walks
const BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "obj", "o", "a", "rlib", "class", "jar", "png", "jpg",
    "jpeg", "gif", "bmp", "ico", "pdf", "zip", "tar", "gz", "xz", "7z",
];

/// Checks the file extension against an optional allow list, ignoring case
pub fn has_valid_extension(path: &Path, extensions: &Option<Vec<String>>) -> bool {
    match extensions {
        None => true,
        Some(exts) => path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| exts.iter().any(|e| e.eq_ignore_ascii_case(ext))),
    }
}

/// Checks a walked path against glob ignore patterns.
///
/// Each pattern is tried against the path relative to the walk `root`, the
/// full path, and the file name alone.
pub fn should_ignore(path: &Path, root: &Path, ignore_patterns: &[String]) -> bool {
    if ignore_patterns.is_empty() {
        return false;
    }

    let normalize = |p: &Path| p.to_string_lossy().replace('\\', "/");
    let full = normalize(path);
    let relative = path.strip_prefix(root).ok().map(normalize);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    ignore_patterns
        .iter()
        .filter_map(|pattern| Pattern::new(pattern).ok())
        .any(|p| {
            relative.as_deref().is_some_and(|rel| p.matches(rel))
                || p.matches(&full)
                || p.matches(&file_name)
        })
}

pub fn is_likely_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|bin_ext| bin_ext.eq_ignore_ascii_case(ext))
        })
}

/// Determines if a walked file should be searched
pub fn should_include_file(
    path: &Path,
    root: &Path,
    extensions: &Option<Vec<String>>,
    ignore_patterns: &[String],
) -> bool {
    !is_likely_binary(path)
        && has_valid_extension(path, extensions)
        && !should_ignore(path, root, ignore_patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_valid_extension() {
        let extensions = Some(vec!["rs".to_string()]);
        assert!(has_valid_extension(Path::new("test.rs"), &extensions));
        assert!(!has_valid_extension(Path::new("test.py"), &extensions));
        assert!(has_valid_extension(Path::new("test.RS"), &extensions));
        assert!(!has_valid_extension(Path::new("test"), &extensions));
        assert!(has_valid_extension(Path::new("test.rs"), &None));
    }

    #[test]
    fn test_should_ignore() {
        let root = Path::new("");
        let ignore_patterns = vec![
            "**/test_[0-4].txt".to_string(),
            "target/**/*.rs".to_string(),
            "*.tmp".to_string(),
        ];

        assert!(should_ignore(Path::new("test_0.txt"), root, &ignore_patterns));
        assert!(should_ignore(Path::new("dir/test_2.txt"), root, &ignore_patterns));
        assert!(should_ignore(
            Path::new("target/debug/main.rs"),
            root,
            &ignore_patterns
        ));
        // file-name match catches nested files
        assert!(should_ignore(Path::new("src/deep/temp.tmp"), root, &ignore_patterns));

        assert!(!should_ignore(Path::new("test_5.txt"), root, &ignore_patterns));
        assert!(!should_ignore(Path::new("src/main.rs"), root, &ignore_patterns));
        assert!(!should_ignore(Path::new("src/main.rs"), root, &[]));
    }

    #[test]
    fn test_should_ignore_relative_to_walk_root() {
        let ignore_patterns = vec!["target/**".to_string(), "sub/**".to_string()];

        assert!(should_ignore(
            Path::new("./target/debug/gen.txt"),
            Path::new("."),
            &ignore_patterns
        ));
        assert!(should_ignore(
            Path::new("/work/project/sub/nested/a.txt"),
            Path::new("/work/project"),
            &ignore_patterns
        ));
        assert!(!should_ignore(
            Path::new("./keep.txt"),
            Path::new("."),
            &ignore_patterns
        ));
        // only the part under the root counts for directory globs
        assert!(!should_ignore(
            Path::new("/work/sub/project/a.txt"),
            Path::new("/work/sub/project"),
            &ignore_patterns
        ));
    }

    #[test]
    fn test_invalid_glob_is_skipped() {
        let ignore_patterns = vec!["[".to_string()];
        assert!(!should_ignore(Path::new("["), Path::new(""), &ignore_patterns));
    }

    #[test]
    fn test_is_likely_binary() {
        assert!(is_likely_binary(Path::new("test.exe")));
        assert!(is_likely_binary(Path::new("test.PDF")));
        assert!(!is_likely_binary(Path::new("test.rs")));
        assert!(!is_likely_binary(Path::new("test")));
    }

    #[test]
    fn test_should_include_file() {
        let extensions = Some(vec!["rs".to_string()]);
        let ignore_patterns = vec!["target/**/*.rs".to_string()];
        let root = Path::new("");

        assert!(should_include_file(
            Path::new("src/main.rs"),
            root,
            &extensions,
            &ignore_patterns
        ));
        assert!(!should_include_file(
            Path::new("src/main.py"),
            root,
            &extensions,
            &ignore_patterns
        ));
        assert!(!should_include_file(
            Path::new("target/debug/main.rs"),
            root,
            &extensions,
            &ignore_patterns
        ));
        assert!(!should_include_file(
            Path::new("src/test.exe"),
            root,
            &None,
            &ignore_patterns
        ));
    }
}
