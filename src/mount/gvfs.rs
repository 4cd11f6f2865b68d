// src/mount/gvfs.rs
use super::ShareLocator;
use regex::Regex;
use std::path::{Path, PathBuf};

/// `<runtime dir>/gvfs`, where GNOME exposes mounted network shares.
pub fn gvfs_base() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(|| PathBuf::from("/run/user/1000"))
        .join("gvfs")
}

/// Pulls `(server, share)` out of a mount name such as `smb-share:server=10.0.0.2,share=media`.
pub fn parse_mount_name(name: &str) -> Option<(String, String)> {
    let re = Regex::new(r"^smb-share:(?:.*,)?server=([^,]+)(?:,.*)?$").ok()?;
    let server = re.captures(name)?.get(1)?.as_str().to_string();
    let share_re = Regex::new(r"(?:^|[:,])share=([^,]+)").ok()?;
    let share = share_re.captures(name)?.get(1)?.as_str().to_string();
    Some((server, share))
}

pub fn find_mount(base: &Path, locator: &ShareLocator) -> Option<PathBuf> {
    let pattern = format!("{}/smb-share:*", glob::Pattern::escape(&base.to_string_lossy()));
    let paths = glob::glob(&pattern).ok()?;

    for path in paths.flatten() {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else { continue };
        if let Some((server, share)) = parse_mount_name(&name) {
            if server.eq_ignore_ascii_case(&locator.server) && share.eq_ignore_ascii_case(&locator.share) {
                return Some(path);
            }
        }
    }
    None
}

pub fn expected_mount(base: &Path, locator: &ShareLocator) -> PathBuf {
    base.join(format!("smb-share:server={},share={}", locator.server, locator.share))
}

/// The discovered mount, or where GVFS would put it.
pub fn resolve_root(base: &Path, locator: &ShareLocator) -> PathBuf {
    find_mount(base, locator).unwrap_or_else(|| expected_mount(base, locator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_mount_name() {
        assert_eq!(
            parse_mount_name("smb-share:server=192.168.1.20,share=media"),
            Some(("192.168.1.20".to_string(), "media".to_string()))
        );
        assert_eq!(
            parse_mount_name("smb-share:domain=WORK,server=nas.local,share=videos,user=bob"),
            Some(("nas.local".to_string(), "videos".to_string()))
        );
        assert_eq!(parse_mount_name("sftp:host=example.com"), None);
        assert_eq!(parse_mount_name("smb-share:server=nas"), None);
    }

    #[test]
    fn test_find_mount_matches_case_insensitively() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("smb-share:server=other,share=media")).unwrap();
        fs::create_dir(tmp.path().join("smb-share:server=nas,share=Media")).unwrap();

        let locator = ShareLocator::new("NAS", "media");
        assert_eq!(find_mount(tmp.path(), &locator), Some(tmp.path().join("smb-share:server=nas,share=Media")));
        assert_eq!(find_mount(tmp.path(), &ShareLocator::new("nas", "music")), None);
    }

    #[test]
    fn test_resolve_root_falls_back_to_expected() {
        let tmp = tempfile::tempdir().unwrap();
        let locator = ShareLocator::new("10.0.0.2", "media");
        assert_eq!(resolve_root(tmp.path(), &locator), tmp.path().join("smb-share:server=10.0.0.2,share=media"));
        assert!(gvfs_base().ends_with("gvfs"));
    }
}
