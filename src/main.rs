//! `nasplay`: browse a mounted NAS share in the terminal and play videos
//! with whichever external player is installed.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use nasplay::config::{Config, APP_NAME};
use nasplay::filesystem::{join_within, EntryKind, NavigatorSession};
use nasplay::mount::{self, gvfs, ShareLocator};
use nasplay::player::{PlaybackDispatcher, PlayerCandidate};
use nasplay::ui::{self, App, Reconnect};
use nasplay::utils::formatter;

#[derive(Parser, Debug)]
#[command(name = "nasplay", version, about)]
struct Args {
    /// Mount point to browse. Skips GVFS discovery.
    #[arg(long)]
    root: Option<PathBuf>,

    /// NAS address (overrides SERVER_IP).
    #[arg(long)]
    server: Option<String>,

    /// Share name on the NAS (overrides SHARE_NAME).
    #[arg(long)]
    share: Option<String>,

    /// Config file (JSON). Defaults to <config dir>/nasplay/config.json.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player to try, in priority order. Repeatable; replaces the configured list.
    #[arg(long = "player")]
    players: Vec<String>,

    /// Show entries starting with `.` or `@`.
    #[arg(long)]
    show_hidden: bool,

    /// Do not try to mount the share when the root is unreachable.
    #[arg(long)]
    no_mount: bool,

    /// Print the listing and exit instead of starting the UI.
    #[arg(long)]
    list: bool,

    /// With --list: folder below the root to list.
    #[arg(long, requires = "list")]
    path: Option<PathBuf>,

    /// With --list: print JSON.
    #[arg(long, requires = "list")]
    json: bool,

    /// Log file for the UI. Defaults to <cache dir>/nasplay/nasplay.log.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env();
    apply_args(&mut config, &args);

    let locator = config.locator();
    let mut root = resolve_root(&config, locator.as_ref())?;

    if !root.is_dir() && !args.no_mount {
        if let Some(locator) = &locator {
            match mount::connect(&config.mount_command, locator, Duration::from_secs(config.mount_timeout_secs)) {
                Ok(mounted) => root = mounted,
                Err(e) => {
                    tracing::warn!(error = %e, "could not mount share");
                    eprintln!("{} {e}\nConnect manually from the file manager ({}), then press r.", "warning:".yellow(), locator.uri());
                }
            }
        }
    }

    let nav = NavigatorSession::new(root, config.video_set())
        .with_hidden_prefixes(config.hidden_prefixes.clone())
        .with_show_hidden(config.show_hidden);

    if args.list {
        return print_listing(nav, args.path.as_deref(), args.json);
    }

    let dispatcher = PlaybackDispatcher::new(config.players.clone());
    let reconnect = locator.map(|locator| Reconnect {
        tool: config.mount_command.clone(),
        locator,
        timeout: Duration::from_secs(config.mount_timeout_secs),
    });

    tracing::info!(root = %nav.root().display(), "starting UI");
    ui::run_tui(App::new(nav, dispatcher, reconnect))
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if args.list {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
        return Ok(());
    }

    // the UI owns the terminal, so logs go to a file
    let path = match &args.log_file {
        Some(path) => path.clone(),
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
            .join("nasplay.log"),
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(root) = &args.root {
        config.root = Some(root.clone());
    }
    if let Some(server) = &args.server {
        config.server_ip = Some(server.clone());
    }
    if let Some(share) = &args.share {
        config.share_name = Some(share.clone());
    }
    if !args.players.is_empty() {
        config.players = args.players.iter().map(PlayerCandidate::new).collect();
    }
    if args.show_hidden {
        config.show_hidden = true;
    }
}

fn resolve_root(config: &Config, locator: Option<&ShareLocator>) -> Result<PathBuf> {
    if let Some(root) = &config.root {
        return Ok(root.clone());
    }
    match locator {
        Some(locator) => Ok(gvfs::resolve_root(&gvfs::gvfs_base(), locator)),
        None => bail!("no share configured: pass --root, or --server and --share (or set SERVER_IP and SHARE_NAME)"),
    }
}

fn print_listing(mut nav: NavigatorSession, below: Option<&Path>, json: bool) -> Result<()> {
    let share_root = nav.root().to_path_buf();
    if let Some(rel) = below {
        let Some(target) = join_within(&share_root, rel) else {
            bail!("--path must be relative to the share and stay inside it: {}", rel.display());
        };
        nav.set_root(target);
    }
    let entries = nav.list_current_directory()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", formatter::display_path(&share_root, nav.current_path()).bold());
    for entry in &entries {
        let name = match entry.kind {
            EntryKind::Folder => format!("{}/", entry.name).blue().bold(),
            EntryKind::Video => entry.name.green(),
            EntryKind::Other if entry.is_document() => entry.name.yellow(),
            EntryKind::Other => entry.name.normal(),
        };
        let size = if entry.is_folder() { String::new() } else { formatter::format_size(entry.size) };
        println!("{:<60} {:<10} {:>10}", name, formatter::kind_label(entry), size);
    }
    println!("{}", formatter::summary(&entries).dimmed());
    Ok(())
}
