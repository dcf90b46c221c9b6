use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory filesystem. Entries are listed in insertion order and every
/// query is counted, so callers can assert that no filesystem access happened.
pub struct MockFileSystem {
    entries: RwLock<Vec<(PathBuf, FileType)>>,
    root: PathBuf,
    accesses: AtomicUsize,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            root,
            accesses: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut entries, parent);
        }
        Self::insert(&mut entries, path, FileType::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        Self::ensure_parents(&mut entries, &path);
    }

    /// Number of trait queries served so far.
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn insert(entries: &mut Vec<(PathBuf, FileType)>, path: PathBuf, file_type: FileType) {
        match entries.iter_mut().find(|(p, _)| *p == path) {
            Some(existing) => existing.1 = file_type,
            None => entries.push((path, file_type)),
        }
    }

    fn ensure_parents(entries: &mut Vec<(PathBuf, FileType)>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if !entries.iter().any(|(p, _)| *p == current) {
                entries.push((current.clone(), FileType::Directory));
            }
        }
    }

    fn lookup(&self, path: &Path) -> Option<FileType> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        let path = self.normalize_path(path);
        self.entries
            .read()
            .unwrap()
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, t)| *t)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lookup(path) == Some(FileType::Directory)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if self.lookup(path) != Some(FileType::Directory) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap();

        Ok(entries
            .iter()
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .map(|(p, file_type)| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
                file_type: *file_type,
            })
            .collect())
    }
}
