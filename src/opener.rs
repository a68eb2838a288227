use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use anyhow::{Context, Result, bail};
use reqwest::Url;

use crate::state::UiEvent;

pub const UNOPENABLE_NOTICE: &str = "Video could not be opened.";

/// Host capability that hands a URL to whatever handles it (browser, video app).
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Opened { url: String },
    Unopenable { url: Option<String>, reason: String },
}

impl LaunchOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, LaunchOutcome::Opened { .. })
    }
}

/// One opener call at most. An absent or blank URL never reaches the opener.
pub fn launch_video_blocking(opener: &dyn UrlOpener, video_url: Option<&str>) -> LaunchOutcome {
    let Some(url) = video_url.map(str::trim).filter(|url| !url.is_empty()) else {
        return LaunchOutcome::Unopenable {
            url: None,
            reason: "no video url".to_string(),
        };
    };
    match opener.open(url) {
        Ok(()) => LaunchOutcome::Opened {
            url: url.to_string(),
        },
        Err(err) => LaunchOutcome::Unopenable {
            url: Some(url.to_string()),
            reason: format!("{err:#}"),
        },
    }
}

/// Opens URLs with the platform handler, or with `command` when configured.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    command: Option<Vec<String>>,
}

impl SystemOpener {
    pub fn new(command: Option<&str>) -> Self {
        let command = command
            .map(|raw| {
                raw.split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|parts| !parts.is_empty());
        Self { command }
    }

    fn build_command(&self, url: &str) -> Command {
        if let Some((program, args)) = self.command.as_ref().and_then(|parts| parts.split_first()) {
            let mut cmd = Command::new(program);
            cmd.args(args).arg(url);
            return cmd;
        }
        platform_command(url)
    }
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        let parsed = validate_video_url(url)?;
        let status = self
            .build_command(parsed.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .context("no url handler available")?;
        if !status.success() {
            bail!("url handler exited with {status}");
        }
        Ok(())
    }
}

/// Only web links are handed to the system handler.
pub fn validate_video_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("malformed url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported url scheme '{other}'"),
    }
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Runs opener calls off the UI thread and reports each outcome back as a `UiEvent`.
#[derive(Clone)]
pub struct VideoLauncher {
    opener: Arc<dyn UrlOpener>,
    tx: Sender<UiEvent>,
}

impl VideoLauncher {
    pub fn new(opener: Arc<dyn UrlOpener>, tx: Sender<UiEvent>) -> Self {
        Self { opener, tx }
    }

    pub fn spawn(&self, video_url: String) {
        let opener = Arc::clone(&self.opener);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = launch_video_blocking(opener.as_ref(), Some(video_url.as_str()));
            let _ = tx.send(UiEvent::LaunchFinished(outcome));
        });
    }
}
