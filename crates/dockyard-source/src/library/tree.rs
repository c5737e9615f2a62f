//! Library directory traversal
//!
//! Layout inside the mirror:
//!
//! ```text
//! <library>/<namespace>/<name>   namespaced image
//! <library>/<name>               root image (empty namespace)
//! ```
//!
//! Hidden entries are ignored. [`LibraryTree::files`] is lazy and can be
//! restarted by calling it again; each item is read from disk only when
//! the iterator reaches it.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use dockyard_core::{ImageName, ImageNameBuilder};
use std::io;
use walkdir::{DirEntry, WalkDir};

/// One library file with its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFile {
    /// Namespace directory name, empty for root images
    pub namespace: String,
    /// Image name (the file name)
    pub name: String,
    /// Location on disk
    pub path: Utf8PathBuf,
    /// Raw file content
    pub content: String,
}

impl LibraryFile {
    /// Image name builder seeded with this file's namespace and name
    pub fn image_builder(&self) -> ImageNameBuilder {
        ImageName::builder()
            .namespace(self.namespace.clone())
            .name(self.name.clone())
    }
}

/// Read-only view of the library directory of a mirror
#[derive(Debug, Clone)]
pub struct LibraryTree {
    root: Utf8PathBuf,
}

impl LibraryTree {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Library directory
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Whether the library directory is present
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Path of the library file describing `image`
    pub fn file_path(&self, image: &ImageName) -> Utf8PathBuf {
        if image.is_root_image() {
            self.root.join(image.name())
        } else {
            self.root.join(image.namespace()).join(image.name())
        }
    }

    /// Read the library file describing `image`
    ///
    /// # Errors
    /// Returns `LibraryRead` if the file is missing or unreadable
    pub fn read(&self, image: &ImageName) -> Result<LibraryFile> {
        let path = self.file_path(image);
        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::library_read(path.as_str(), e))?;

        Ok(LibraryFile {
            namespace: image.namespace().to_string(),
            name: image.name().to_string(),
            path,
            content,
        })
    }

    /// Iterate over every library file, in file name order
    ///
    /// A file that cannot be read yields an `Err` item; iteration goes on
    /// with the next file.
    pub fn files(&self) -> impl Iterator<Item = Result<LibraryFile>> + '_ {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(self.load(&entry)),
                Ok(_) => None,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| self.root.to_string());
                    Some(Err(Error::library_read(path, io::Error::from(e))))
                }
            })
    }

    fn load(&self, entry: &DirEntry) -> Result<LibraryFile> {
        let path = Utf8PathBuf::from_path_buf(entry.path().to_path_buf()).map_err(|p| {
            Error::library_read(
                p.display().to_string(),
                io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
            )
        })?;

        let name = path.file_name().unwrap_or_default().to_string();
        let namespace = if entry.depth() == 2 {
            path.parent()
                .and_then(Utf8Path::file_name)
                .unwrap_or_default()
                .to_string()
        } else {
            String::new()
        };

        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::library_read(path.as_str(), e))?;

        Ok(LibraryFile {
            namespace,
            name,
            path,
            content,
        })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn library(temp_dir: &TempDir) -> LibraryTree {
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().join("library")).unwrap();
        fs::create_dir_all(root.join("library")).unwrap();
        fs::create_dir_all(root.join("acme")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("library").join("alpine"), "alpine content").unwrap();
        fs::write(root.join("library").join("php"), "php content").unwrap();
        fs::write(root.join("acme").join("tool"), "tool content").unwrap();
        fs::write(root.join(".cache").join("ignored"), "x").unwrap();
        fs::write(root.join("busybox"), "busybox content").unwrap();
        fs::write(root.join(".hidden"), "x").unwrap();
        LibraryTree::new(root)
    }

    #[test]
    fn test_files_walks_namespaces_and_root_images() {
        let temp_dir = TempDir::new().unwrap();
        let tree = library(&temp_dir);

        let files: Vec<_> = tree.files().collect::<Result<_>>().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| format!("{}/{}", f.namespace, f.name))
            .collect();

        assert_eq!(
            names,
            vec!["acme/tool", "/busybox", "library/alpine", "library/php"]
        );
        assert_eq!(files[2].content, "alpine content");
    }

    #[test]
    fn test_files_is_restartable() {
        let temp_dir = TempDir::new().unwrap();
        let tree = library(&temp_dir);

        assert_eq!(tree.files().count(), 4);
        fs::write(tree.root().join("acme").join("other"), "other").unwrap();
        assert_eq!(tree.files().count(), 5);
    }

    #[test]
    fn test_file_path_for_root_and_namespaced_images() {
        let tree = LibraryTree::new("/mirror/library");

        let root = ImageName::parse("busybox:1.36").unwrap();
        assert_eq!(tree.file_path(&root), Utf8PathBuf::from("/mirror/library/busybox"));

        let namespaced = ImageName::parse("library/alpine:3.18").unwrap();
        assert_eq!(
            tree.file_path(&namespaced),
            Utf8PathBuf::from("/mirror/library/library/alpine")
        );
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let tree = library(&temp_dir);

        let result = tree.read(&ImageName::parse("library/nope").unwrap());
        assert!(matches!(result, Err(Error::LibraryRead { .. })));

        let file = tree.read(&ImageName::parse("acme/tool:1.0").unwrap()).unwrap();
        assert_eq!(file.content, "tool content");
        assert_eq!(file.image_builder().build().unwrap().to_string(), "acme/tool");
    }

    #[test]
    fn test_missing_root() {
        let tree = LibraryTree::new("/nonexistent/library");
        assert!(!tree.exists());
    }
}
