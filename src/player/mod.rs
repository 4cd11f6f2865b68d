// src/player/mod.rs
//! Hands videos to the first external player that can be started.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

pub mod candidates;

pub use candidates::{default_openers, default_players, PlayerCandidate};

use crate::error::PlayError;
use crate::filesystem::DirectoryEntry;

/// Process-launch boundary: resolve a program name, start it without waiting.
pub trait Launcher {
    fn resolve(&self, program: &str) -> Option<PathBuf>;
    /// Starts `program args.. target` detached and returns its pid.
    fn spawn_detached(&self, program: &Path, args: &[String], target: &Path) -> io::Result<u32>;
}

/// Called from the reaper thread with the player's pid and exit code.
pub type ExitObserver = Arc<dyn Fn(u32, Option<i32>) + Send + Sync>;

#[derive(Clone, Default)]
pub struct SystemLauncher {
    on_exit: Option<ExitObserver>,
}

impl SystemLauncher {
    pub fn new() -> Self {
        SystemLauncher { on_exit: None }
    }

    pub fn with_exit_observer(mut self, observer: ExitObserver) -> Self {
        self.on_exit = Some(observer);
        self
    }
}

impl Launcher for SystemLauncher {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn spawn_detached(&self, program: &Path, args: &[String], target: &Path) -> io::Result<u32> {
        let mut command = Command::new(program);
        command
            .args(args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // keep Ctrl-C in our terminal from reaching the player
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn()?;
        let pid = child.id();
        let on_exit = self.on_exit.clone();

        std::thread::spawn(move || {
            let code = match child.wait() {
                Ok(status) => status.code(),
                Err(e) => {
                    tracing::debug!(pid, error = %e, "could not wait on player");
                    None
                }
            };
            tracing::debug!(pid, ?code, "player exited");
            if let Some(observer) = on_exit {
                observer(pid, code);
            }
        });

        Ok(pid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    pub player: String,
    pub pid: u32,
}

pub struct PlaybackDispatcher<L = SystemLauncher> {
    candidates: Vec<PlayerCandidate>,
    openers: Vec<PlayerCandidate>,
    launcher: L,
}

impl PlaybackDispatcher<SystemLauncher> {
    pub fn new(candidates: Vec<PlayerCandidate>) -> Self {
        PlaybackDispatcher::with_launcher(candidates, SystemLauncher::new())
    }
}

impl<L: Launcher> PlaybackDispatcher<L> {
    pub fn with_launcher(candidates: Vec<PlayerCandidate>, launcher: L) -> Self {
        PlaybackDispatcher { candidates, openers: default_openers(), launcher }
    }

    pub fn with_openers(mut self, openers: Vec<PlayerCandidate>) -> Self {
        self.openers = openers;
        self
    }

    pub fn candidates(&self) -> &[PlayerCandidate] {
        &self.candidates
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn play(&self, entry: &DirectoryEntry) -> Result<Launched, PlayError> {
        if !entry.is_video() {
            return Err(PlayError::NotAVideo(entry.path.clone()));
        }
        self.play_path(&entry.path)
    }

    /// Tries each candidate in order and stops at the first successful spawn.
    pub fn play_path(&self, path: &Path) -> Result<Launched, PlayError> {
        self.launch_first(&self.candidates, path)
            .map_err(|tried| PlayError::NoPlayerAvailable { tried })
    }

    /// Hands a document to the system's default application.
    pub fn open_document(&self, entry: &DirectoryEntry) -> Result<Launched, PlayError> {
        if !entry.is_document() {
            return Err(PlayError::NotADocument(entry.path.clone()));
        }
        self.launch_first(&self.openers, &entry.path)
            .map_err(|tried| PlayError::NoOpenerAvailable { tried })
    }

    /// Returns the programs tried when none could be started.
    fn launch_first(&self, candidates: &[PlayerCandidate], path: &Path) -> Result<Launched, Vec<String>> {
        let mut tried = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            tried.push(candidate.program.clone());

            let Some(program) = self.launcher.resolve(&candidate.program) else {
                tracing::debug!(player = %candidate.program, "player not installed");
                continue;
            };

            match self.launcher.spawn_detached(&program, &candidate.args, path) {
                Ok(pid) => {
                    tracing::info!(player = %candidate.program, pid, target = %path.display(), "launched");
                    return Ok(Launched { player: candidate.program.clone(), pid });
                }
                Err(e) => {
                    tracing::warn!(player = %candidate.program, error = %e, "player failed to start");
                }
            }
        }

        Err(tried)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{DocumentKind, EntryKind};
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeLauncher {
        installed: HashSet<String>,
        broken: HashSet<String>,
        resolved: RefCell<Vec<String>>,
        spawned: RefCell<Vec<(PathBuf, Vec<String>, PathBuf)>>,
    }

    impl FakeLauncher {
        fn with_installed(names: &[&str]) -> Self {
            FakeLauncher {
                installed: names.iter().map(|n| n.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Launcher for FakeLauncher {
        fn resolve(&self, program: &str) -> Option<PathBuf> {
            self.resolved.borrow_mut().push(program.to_string());
            self.installed.contains(program).then(|| PathBuf::from("/usr/bin").join(program))
        }

        fn spawn_detached(&self, program: &Path, args: &[String], target: &Path) -> io::Result<u32> {
            let name = program.file_name().unwrap().to_string_lossy().to_string();
            if self.broken.contains(&name) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.spawned.borrow_mut().push((program.to_path_buf(), args.to_vec(), target.to_path_buf()));
            Ok(4242)
        }
    }

    fn players(names: &[&str]) -> Vec<PlayerCandidate> {
        names.iter().map(|n| PlayerCandidate::new(*n)).collect()
    }

    fn video(path: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: Path::new(path).file_name().unwrap().to_string_lossy().to_string(),
            path: PathBuf::from(path),
            kind: EntryKind::Video,
            size: 1,
            modified: None,
            is_hidden: false,
            document: None,
        }
    }

    #[test]
    fn test_falls_back_to_first_installed() {
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["p1", "p2", "p3"]), FakeLauncher::with_installed(&["p2", "p3"]));
        let launched = dispatcher.play(&video("/share/a.mp4")).unwrap();

        assert_eq!(launched, Launched { player: "p2".into(), pid: 4242 });
        assert_eq!(*dispatcher.launcher().resolved.borrow(), vec!["p1", "p2"]);
        let spawned = dispatcher.launcher().spawned.borrow();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].0, PathBuf::from("/usr/bin/p2"));
        assert_eq!(spawned[0].2, PathBuf::from("/share/a.mp4"));
    }

    #[test]
    fn test_no_player_available() {
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["p1", "p2"]), FakeLauncher::default());
        let err = dispatcher.play(&video("/share/a.mp4")).unwrap_err();

        match err {
            PlayError::NoPlayerAvailable { tried } => assert_eq!(tried, vec!["p1", "p2"]),
            other => panic!("unexpected error: {other}"),
        }
        assert!(dispatcher.launcher().spawned.borrow().is_empty());
    }

    #[test]
    fn test_spawn_failure_advances() {
        let mut launcher = FakeLauncher::with_installed(&["p1", "p2"]);
        launcher.broken.insert("p1".to_string());
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["p1", "p2"]), launcher);

        assert_eq!(dispatcher.play_path(Path::new("/share/b.mkv")).unwrap().player, "p2");
    }

    #[test]
    fn test_leading_args_are_passed() {
        let candidates = vec![PlayerCandidate::new("cmd").with_args(["/C", "start", ""])];
        let dispatcher = PlaybackDispatcher::with_launcher(candidates, FakeLauncher::with_installed(&["cmd"]));
        dispatcher.play_path(Path::new("C:/share/a.mp4")).unwrap();

        let spawned = dispatcher.launcher().spawned.borrow();
        assert_eq!(spawned[0].1, vec!["/C", "start", ""]);
    }

    #[test]
    fn test_play_requires_video() {
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["p1"]), FakeLauncher::with_installed(&["p1"]));
        let mut entry = video("/share/notes.txt");
        entry.kind = EntryKind::Other;

        assert!(matches!(dispatcher.play(&entry), Err(PlayError::NotAVideo(_))));
        assert!(dispatcher.launcher().resolved.borrow().is_empty());
    }

    #[test]
    fn test_empty_priority_list() {
        let dispatcher = PlaybackDispatcher::with_launcher(Vec::new(), FakeLauncher::default());
        assert!(matches!(dispatcher.play_path(Path::new("/a.mp4")), Err(PlayError::NoPlayerAvailable { tried }) if tried.is_empty()));
    }

    #[test]
    fn test_open_document_uses_openers() {
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["mpv"]), FakeLauncher::with_installed(&["mpv", "xdg-open"]))
            .with_openers(players(&["gio-open", "xdg-open"]));
        let mut doc = video("/share/manual.pdf");
        doc.kind = EntryKind::Other;
        doc.document = Some(DocumentKind::Pdf);

        let launched = dispatcher.open_document(&doc).unwrap();
        assert_eq!(launched.player, "xdg-open");
        assert_eq!(*dispatcher.launcher().resolved.borrow(), vec!["gio-open", "xdg-open"]);
    }

    #[test]
    fn test_open_document_errors() {
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["mpv"]), FakeLauncher::with_installed(&["mpv"]))
            .with_openers(players(&["xdg-open"]));
        let mut doc = video("/share/notes.txt");
        doc.kind = EntryKind::Other;
        assert!(matches!(dispatcher.open_document(&doc), Err(PlayError::NotADocument(_))));

        doc.document = Some(DocumentKind::Text);
        match dispatcher.open_document(&doc) {
            Err(PlayError::NoOpenerAvailable { tried }) => assert_eq!(tried, vec!["xdg-open"]),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(dispatcher.launcher().spawned.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_launcher_skips_missing_program() {
        use std::sync::mpsc;
        use std::time::Duration;

        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let launcher = SystemLauncher::new().with_exit_observer(Arc::new(move |pid: u32, code: Option<i32>| {
            let _ = tx.lock().map(|tx| tx.send((pid, code)));
        }));
        let dispatcher = PlaybackDispatcher::with_launcher(players(&["nasplay-no-such-player", "true"]), launcher);

        let launched = dispatcher.play_path(Path::new("/tmp/a.mp4")).unwrap();
        assert_eq!(launched.player, "true");

        let (pid, code) = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(pid, launched.pid);
        assert_eq!(code, Some(0));
    }
}
