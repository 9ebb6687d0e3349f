use crate::error::{Error, Result};
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// File scanner for traversing Go package directories.
///
/// The `FileScanner` recursively walks a package directory to find all Go
/// source files. Test files (`_test.go`) are ignored, and so are hidden
/// directories and the `vendor` and `testdata` trees.
///
/// # Example
///
/// ```no_run
/// use swagger_docgen::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("/go/src/acme/api"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} Go files", result.go_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Result of directory scanning operation.
pub struct ScanResult {
    /// List of paths to all discovered `.go` files, sorted
    pub go_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for the specified root directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all non-test `.go` files.
    ///
    /// Inaccessible entries are logged and recorded as warnings; scanning
    /// continues past them.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a readable directory.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.is_dir() {
            return Err(Error::io(
                &self.root_path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "package directory not found"),
            ));
        }

        let mut go_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.root_path {
                    return true;
                }
                if !e.file_type().is_dir() {
                    return true;
                }
                let file_name = e.file_name().to_string_lossy();
                !file_name.starts_with('.') && file_name != "vendor" && file_name != "testdata"
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let is_go = path.extension().and_then(|s| s.to_str()) == Some("go");
                    let is_test = path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .is_some_and(|name| name.ends_with("_test.go"));
                    if entry.file_type().is_file() && is_go && !is_test {
                        go_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult { go_files, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_names(result: &ScanResult) -> Vec<String> {
        result
            .go_files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_scan_package_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("main.go"), "package main").unwrap();
        fs::write(root.join("router.go"), "package main").unwrap();
        fs::write(root.join("README.md"), "# README").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(file_names(&result), vec!["main.go", "router.go"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_skips_test_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("api.go"), "package api").unwrap();
        fs::write(root.join("api_test.go"), "package api").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(file_names(&result), vec!["api.go"]);
    }

    #[test]
    fn test_scan_nested_packages() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("controllers/admin")).unwrap();
        fs::create_dir(root.join("models")).unwrap();
        fs::write(root.join("main.go"), "package main").unwrap();
        fs::write(root.join("controllers/user.go"), "package controllers").unwrap();
        fs::write(root.join("controllers/admin/admin.go"), "package admin").unwrap();
        fs::write(root.join("models/user.go"), "package models").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(result.go_files.len(), 4);
    }

    #[test]
    fn test_scan_skips_vendor_testdata_and_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        for dir in ["vendor/lib", "testdata", ".git"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("x.go"), "package x").unwrap();
        }
        fs::write(root.join("main.go"), "package main").unwrap();

        let result = FileScanner::new(root.to_path_buf()).scan().unwrap();

        assert_eq!(file_names(&result), vec!["main.go"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = FileScanner::new(missing).scan();

        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
