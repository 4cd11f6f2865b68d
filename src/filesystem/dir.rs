// src/filesystem/dir.rs
use super::{DirectoryEntry, VideoExtensionSet};
use crate::error::NavError;
use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Current location over the mounted share plus the stack of places visited before it.
#[derive(Debug, Clone)]
pub struct NavigatorSession {
    root: PathBuf,
    current_path: PathBuf,
    history: Vec<PathBuf>,
    videos: VideoExtensionSet,
    hidden_prefixes: Vec<String>,
    pub show_hidden: bool,
}

impl NavigatorSession {
    pub fn new(root: PathBuf, videos: VideoExtensionSet) -> Self {
        NavigatorSession {
            current_path: root.clone(),
            root,
            history: Vec::new(),
            videos,
            hidden_prefixes: vec![".".to_string(), "@".to_string()],
            show_hidden: false,
        }
    }

    pub fn with_hidden_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.hidden_prefixes = prefixes;
        self
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn videos(&self) -> &VideoExtensionSet {
        &self.videos
    }

    /// Lists the immediate children of the current path: folders first, then files,
    /// each group by case-insensitive name.
    pub fn list_current_directory(&self) -> Result<Vec<DirectoryEntry>, NavError> {
        let path = &self.current_path;
        let mut entries = Vec::new();

        // symlinked children are resolved by `from_path`, so walkdir must not follow them
        for entry in WalkDir::new(path).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 || e.path() == Some(path.as_path()) => {
                    return Err(NavError::Access { path: path.clone(), source: io::Error::from(e) });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                if !path.is_dir() {
                    let source = io::Error::other("not a directory");
                    return Err(NavError::Access { path: path.clone(), source });
                }
                continue;
            }

            match DirectoryEntry::from_path(entry.path(), &self.videos, &self.hidden_prefixes) {
                Some(file_entry) => {
                    if !self.show_hidden && file_entry.is_hidden { continue; }
                    entries.push(file_entry);
                }
                None => tracing::debug!(path = %entry.path().display(), "skipping entry without metadata"),
            }
        }

        entries.sort_by(listing_order);
        tracing::debug!(path = %path.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }

    pub fn enter(&mut self, entry: &DirectoryEntry) -> Result<&Path, NavError> {
        if !entry.is_folder() {
            return Err(NavError::NotAFolder(entry.path.clone()));
        }
        let previous = std::mem::replace(&mut self.current_path, entry.path.clone());
        self.history.push(previous);
        tracing::info!(path = %self.current_path.display(), "entered folder");
        Ok(&self.current_path)
    }

    /// No-op when there is nothing to go back to.
    pub fn go_back(&mut self) -> &Path {
        if let Some(previous) = self.history.pop() {
            self.current_path = previous;
        }
        &self.current_path
    }

    pub fn go_home(&mut self) -> &Path {
        self.history.clear();
        self.current_path = self.root.clone();
        &self.current_path
    }

    /// Moves to the parent folder, never above the root. Recorded in history like `enter`.
    pub fn go_up(&mut self) -> Option<&Path> {
        if self.current_path == self.root || !self.current_path.starts_with(&self.root) {
            return None;
        }
        let parent = self.current_path.parent()?.to_path_buf();
        let previous = std::mem::replace(&mut self.current_path, parent);
        self.history.push(previous);
        Some(&self.current_path)
    }

    /// Points the session at a new root (after a remount) and goes home.
    pub fn set_root(&mut self, root: PathBuf) {
        self.root = root;
        self.go_home();
    }
}

fn listing_order(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}
