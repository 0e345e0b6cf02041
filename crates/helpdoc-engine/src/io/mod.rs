use std::fs;
use std::path::{Path, PathBuf};

/// File extension of documented source files.
pub const SOURCE_EXTENSION: &str = "m";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid source directory: {0}")]
    InvalidSourceDir(PathBuf),
}

/// Read a source file and return its content
pub fn read_source(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write rendered output, creating parent directories if they don't exist
pub fn write_output(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::write(path, content).map_err(IoError::Io)
}

/// Scan for source files under `root`, sorted by path
pub fn scan_source_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidSourceDir(root.to_path_buf()));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == SOURCE_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_source_dir};

    #[test]
    fn test_scan_nested_directories() {
        let source_dir = create_test_source_dir();
        create_test_file(&source_dir, "rotx.m", "%ROTX");
        create_test_file(&source_dir, "@Quaternion/Quaternion.m", "%QUATERNION");

        let files = scan_source_files(source_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "rotx.m"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "Quaternion.m"));
    }

    #[test]
    fn test_ignore_non_source_files() {
        let source_dir = create_test_source_dir();
        create_test_file(&source_dir, "rotx.m", "%ROTX");
        create_test_file(&source_dir, "README.md", "# readme");
        create_test_file(&source_dir, "data.mat", "binary");

        let files = scan_source_files(source_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "rotx.m");
    }

    #[test]
    fn test_scan_invalid_directory() {
        let result = scan_source_files(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidSourceDir(_))));
    }

    #[test]
    fn test_read_source_not_found() {
        let source_dir = create_test_source_dir();
        let result = read_source(&source_dir.path().join("missing.m"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let source_dir = create_test_source_dir();
        let out = source_dir.path().join("html/rotx.html");

        write_output(&out, "<h1>rotx</h1>").unwrap();

        assert_eq!(read_source(&out).unwrap(), "<h1>rotx</h1>");
    }
}
