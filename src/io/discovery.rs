use std::{
    fs,
    path::{Path, PathBuf},
    vec,
};

use crate::common::error::DiscoveryError;

/// Lazy, depth-first walk over a directory tree yielding the regular files whose
/// extension matches, including symlinks that resolve to one. Entries of each directory are visited in file-name order so
/// a run over the same tree always folds transactions in the same order.
#[derive(Debug)]
pub struct LogFiles {
    extension: String,
    excluded: Vec<PathBuf>,
    stack: Vec<vec::IntoIter<fs::DirEntry>>,
}

impl LogFiles {
    /// Fails fast when `root` is not a directory.
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Result<Self, DiscoveryError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
        }
        let entries = sorted_entries(root)?;
        Ok(Self {
            extension: extension.into(),
            excluded: Vec::new(),
            stack: vec![entries],
        })
    }

    /// Skips `dir` and everything below it.
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.extension.as_str())
    }
}

impl Iterator for LogFiles {
    type Item = Result<PathBuf, DiscoveryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entries = self.stack.last_mut()?;
            let Some(entry) = entries.next() else {
                self.stack.pop();
                continue;
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(source) => return Some(Err(DiscoveryError::Walk { path, source })),
            };

            if file_type.is_dir() {
                if self.excluded.iter().any(|ex| ex == &path) {
                    continue;
                }
                match sorted_entries(&path) {
                    Ok(entries) => self.stack.push(entries),
                    Err(e) => return Some(Err(e)),
                }
            } else if file_type.is_file() && self.matches(&path) {
                return Some(Ok(path));
            } else if file_type.is_symlink() && self.matches(&path) {
                // linked files count, linked directories are not descended into
                if fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
                    return Some(Ok(path));
                }
            }
        }
    }
}

fn sorted_entries(dir: &Path) -> Result<vec::IntoIter<fs::DirEntry>, DiscoveryError> {
    let walk_err = |source| DiscoveryError::Walk {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(walk_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(walk_err)?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries.into_iter())
}
