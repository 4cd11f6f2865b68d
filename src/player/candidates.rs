// src/player/candidates.rs
use serde::{Deserialize, Serialize};

/// One external program to try, with any arguments that go before the video path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CandidateSpec")]
pub struct PlayerCandidate {
    pub program: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateSpec {
    Program(String),
    Full {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl From<CandidateSpec> for PlayerCandidate {
    fn from(spec: CandidateSpec) -> Self {
        match spec {
            CandidateSpec::Program(program) => PlayerCandidate::new(program),
            CandidateSpec::Full { program, args } => PlayerCandidate { program, args },
        }
    }
}

impl PlayerCandidate {
    pub fn new(program: impl Into<String>) -> Self {
        PlayerCandidate { program: program.into(), args: Vec::new() }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(target_os = "windows")]
pub fn default_players() -> Vec<PlayerCandidate> {
    // `start` treats the first quoted argument as the window title
    vec![PlayerCandidate::new("cmd").with_args(["/C", "start", ""])]
}

#[cfg(target_os = "macos")]
pub fn default_players() -> Vec<PlayerCandidate> {
    vec![PlayerCandidate::new("open")]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn default_players() -> Vec<PlayerCandidate> {
    ["mpv", "totem", "gnome-videos", "xdg-open", "/usr/bin/vlc"]
        .into_iter()
        .map(PlayerCandidate::new)
        .collect()
}

/// System handlers used for documents that cannot be previewed in the terminal.
#[cfg(target_os = "windows")]
pub fn default_openers() -> Vec<PlayerCandidate> {
    vec![PlayerCandidate::new("cmd").with_args(["/C", "start", ""])]
}

#[cfg(target_os = "macos")]
pub fn default_openers() -> Vec<PlayerCandidate> {
    vec![PlayerCandidate::new("open")]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn default_openers() -> Vec<PlayerCandidate> {
    vec![PlayerCandidate::new("xdg-open")]
}
