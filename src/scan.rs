//! Directory listing.
//!
//! Lists the image files at the top level of the source directory, in the
//! order their URLs will appear on product pages. Only the extension is
//! checked here; the filename grammar is enforced later by
//! [`naming::parse_image_filename`](crate::naming::parse_image_filename) so
//! malformed names can be reported instead of silently dropped.

use crate::config::{ScanConfig, ScanOrder};
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Filenames (not paths) of candidate images in `dir`, in scan order.
///
/// Hidden files, subdirectories and names that are not valid UTF-8 are left
/// out.
pub fn scan(dir: &Path, config: &ScanConfig) -> Result<Vec<String>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 filename");
            continue;
        };
        if name.starts_with('.') || !naming::has_image_extension(name, &config.extensions) {
            continue;
        }
        files.push(name.to_string());
    }

    sort_listing(&mut files, config.order);
    tracing::debug!(count = files.len(), dir = %dir.display(), "scanned images");
    Ok(files)
}

pub fn sort_listing(files: &mut [String], order: ScanOrder) {
    match order {
        ScanOrder::Plain => files.sort(),
        ScanOrder::Natural => files.sort_by(|a, b| naming::natural_cmp(a, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "fake image").unwrap();
        }
    }

    #[test]
    fn lists_only_images() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["1-Cat.jpg", "README.md", "1.html", "2-Dog.JPG", ".9-Hidden.jpg"]);

        let files = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(files, vec!["1-Cat.jpg", "2-Dog.JPG"]);
    }

    #[test]
    fn keeps_malformed_image_names_for_reporting() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["Cat.jpg"]);

        let files = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(files, vec!["Cat.jpg"]);
    }

    #[test]
    fn does_not_descend_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("3-Folder.jpg")).unwrap();
        fs::create_dir(tmp.path().join("old")).unwrap();
        touch(&tmp.path().join("old"), &["4-Old.jpg"]);
        touch(tmp.path(), &["1-Cat.jpg"]);

        let files = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(files, vec!["1-Cat.jpg"]);
    }

    #[test]
    fn plain_order_is_bytewise() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["2-Dog10.jpg", "10-Ship.jpg", "2-Dog9.jpg"]);

        let files = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(files, vec!["10-Ship.jpg", "2-Dog10.jpg", "2-Dog9.jpg"]);
    }

    #[test]
    fn natural_order_compares_numbers() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["2-Dog10.jpg", "10-Ship.jpg", "2-Dog9.jpg"]);

        let config = ScanConfig {
            order: ScanOrder::Natural,
            ..ScanConfig::default()
        };
        let files = scan(tmp.path(), &config).unwrap();
        assert_eq!(files, vec!["2-Dog9.jpg", "2-Dog10.jpg", "10-Ship.jpg"]);
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), &ScanConfig::default());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }
}
