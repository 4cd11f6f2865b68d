// src/lib.rs
pub mod config;
pub mod error;
pub mod filesystem;
pub mod mount;
pub mod player;
pub mod preview;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, MountError, NavError, PlayError};
pub use filesystem::{DirectoryEntry, DocumentKind, EntryKind, NavigatorSession, VideoExtensionSet};
pub use player::{Launched, Launcher, PlaybackDispatcher, PlayerCandidate, SystemLauncher};
