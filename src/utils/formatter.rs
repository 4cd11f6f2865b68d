// src/utils/formatter.rs
use chrono::{DateTime, Local, Utc};
use std::path::Path;

use crate::filesystem::{DirectoryEntry, EntryKind};

pub const ROOT_LABEL: &str = "Server";

pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

/// Shows `current` relative to the share root, e.g. `Server/Movies/2020`.
pub fn display_path(root: &Path, current: &Path) -> String {
    match current.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ROOT_LABEL.to_string(),
        Ok(rel) => {
            let parts: Vec<String> = rel.components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect();
            format!("{}/{}", ROOT_LABEL, parts.join("/"))
        }
        Err(_) => {
            let name = current.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            format!("{}/{}", ROOT_LABEL, name)
        }
    }
}

pub fn format_modified(modified: Option<DateTime<Utc>>) -> String {
    modified
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn kind_label(entry: &DirectoryEntry) -> String {
    let ext = entry.path.extension()
        .map(|e| e.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    match entry.kind {
        EntryKind::Folder => "Folder".to_string(),
        EntryKind::Video if ext.is_empty() => "Video".to_string(),
        EntryKind::Video => format!("Video {}", ext),
        EntryKind::Other if entry.is_document() => format!("Document {}", ext),
        EntryKind::Other if ext.is_empty() => "File".to_string(),
        EntryKind::Other => format!("File {}", ext),
    }
}

/// `3 folders | 2 videos | 1 documents | 4 files`, documents are not counted as files.
pub fn summary(entries: &[DirectoryEntry]) -> String {
    let count = |kind: EntryKind| entries.iter().filter(|e| e.kind == kind).count();
    let documents = entries.iter().filter(|e| e.is_document()).count();
    format!(
        "{} folders | {} videos | {} documents | {} files",
        count(EntryKind::Folder),
        count(EntryKind::Video),
        documents,
        count(EntryKind::Other) - documents
    )
}
