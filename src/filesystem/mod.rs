// src/filesystem/mod.rs
pub mod dir;
pub mod file;

pub use dir::NavigatorSession;

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    Video,
    Other,
}

/// Documents are "other" files the browser can still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Zero for folders.
    pub size: u64,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    pub is_hidden: bool,
    /// Only set for `EntryKind::Other`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentKind>,
}

impl DirectoryEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    pub fn is_video(&self) -> bool {
        self.kind == EntryKind::Video
    }

    pub fn is_document(&self) -> bool {
        self.document.is_some()
    }
}

/// Joins a relative path under `root`, refusing absolute paths and `..`.
pub fn join_within(root: &Path, rel: &Path) -> Option<PathBuf> {
    let mut joined = root.to_path_buf();
    for component in rel.components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(joined)
}

/// Extensions classified as video, stored lowercase without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoExtensionSet {
    extensions: BTreeSet<String>,
}

impl VideoExtensionSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        VideoExtensionSet { extensions }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_lowercase())
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.contains(e))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for VideoExtensionSet {
    fn default() -> Self {
        VideoExtensionSet::new(DEFAULT_VIDEO_EXTENSIONS)
    }
}
