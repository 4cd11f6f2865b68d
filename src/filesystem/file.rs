// src/filesystem/file.rs
use super::{DirectoryEntry, DocumentKind, EntryKind, VideoExtensionSet};
use std::path::Path;

/// Classification depends only on the name and whether the entry is a directory.
pub fn classify(path: &Path, is_dir: bool, videos: &VideoExtensionSet) -> EntryKind {
    if is_dir {
        EntryKind::Folder
    } else if videos.matches(path) {
        EntryKind::Video
    } else {
        EntryKind::Other
    }
}

pub fn is_hidden_name(name: &str, hidden_prefixes: &[String]) -> bool {
    hidden_prefixes.iter().any(|p| !p.is_empty() && name.starts_with(p.as_str()))
}

impl DirectoryEntry {
    /// Builds an entry from a path, following symlinks. `None` if it cannot be stat'ed.
    pub fn from_path(path: &Path, videos: &VideoExtensionSet, hidden_prefixes: &[String]) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        let name = path.file_name()?.to_string_lossy().to_string();
        let is_dir = metadata.is_dir();
        let size = if is_dir { 0 } else { metadata.len() };
        let modified = metadata.modified().ok()
            .map(chrono::DateTime::<chrono::Utc>::from);
        let is_hidden = is_hidden_name(&name, hidden_prefixes);
        let kind = classify(path, is_dir, videos);
        let document = if kind == EntryKind::Other { DocumentKind::from_path(path) } else { None };

        Some(DirectoryEntry { name, path: path.to_path_buf(), kind, size, modified, is_hidden, document })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn prefixes() -> Vec<String> {
        vec![".".to_string(), "@".to_string()]
    }

    #[test]
    fn test_classify() {
        let videos = VideoExtensionSet::default();
        assert_eq!(classify(Path::new("a.MP4"), false, &videos), EntryKind::Video);
        assert_eq!(classify(Path::new("notes.txt"), false, &videos), EntryKind::Other);
        assert_eq!(classify(Path::new("B"), true, &videos), EntryKind::Folder);
        // a directory named like a video is still a folder
        assert_eq!(classify(Path::new("clips.mkv"), true, &videos), EntryKind::Folder);
    }

    #[test]
    fn test_hidden_prefixes() {
        assert!(is_hidden_name(".DS_Store", &prefixes()));
        assert!(is_hidden_name("@eaDir", &prefixes()));
        assert!(!is_hidden_name("Movies", &prefixes()));
        assert!(!is_hidden_name("Movies", &[String::new()]));
    }

    #[test]
    fn test_entry_from_path() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("clip.webm");
        fs::write(&file, b"12345").unwrap();

        let entry = DirectoryEntry::from_path(&file, &VideoExtensionSet::default(), &prefixes()).unwrap();
        assert_eq!(entry.name, "clip.webm");
        assert_eq!(entry.kind, EntryKind::Video);
        assert_eq!(entry.size, 5);
        assert!(entry.modified.is_some());
        assert!(!entry.is_hidden);
        assert_eq!(entry.document, None);

        let notes = tmp.path().join("notes.txt");
        fs::write(&notes, b"hello").unwrap();
        let entry = DirectoryEntry::from_path(&notes, &VideoExtensionSet::default(), &prefixes()).unwrap();
        assert_eq!(entry.kind, EntryKind::Other);
        assert_eq!(entry.document, Some(DocumentKind::Text));

        assert!(DirectoryEntry::from_path(&tmp.path().join("missing"), &VideoExtensionSet::default(), &prefixes()).is_none());
    }
}
