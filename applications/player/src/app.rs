//! Command interpreter around a [`PlayerSession`]

use crate::command::{Command, HELP};
use crate::config::PlayerConfig;
use crate::device::SimulatedDevice;
use crate::error::{PlayerAppError, Result};
use cadence_core::{Library, Track};
use cadence_playback::{format_time, DeviceEvent, PlayerSession, VolumeIndicator};
use std::fmt::Write as _;
use tracing::{info, warn};

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep reading
    Text(String),
    /// Stop reading commands
    Quit,
}

pub struct Player {
    session: PlayerSession<SimulatedDevice>,
    library: Library,
}

impl Player {
    /// Build a player, preloading the configured library listing
    pub fn new(config: &PlayerConfig, device: SimulatedDevice) -> Result<Self> {
        let library = match &config.library.path {
            Some(path) => {
                let library = Library::from_json_file(path)?;
                info!(path = %path.display(), tracks = library.len(), "library loaded");
                library
            }
            None => Library::new(),
        };
        Ok(Self::with_library(config, device, library))
    }

    pub fn with_library(config: &PlayerConfig, mut device: SimulatedDevice, library: Library) -> Self {
        for track in library.tracks() {
            if let Some(duration) = track.duration_hint() {
                device.set_duration(track.src.clone(), duration.as_secs_f64());
            }
        }

        Self {
            session: PlayerSession::new(device, &config.playback),
            library,
        }
    }

    /// Parse and run one input line
    pub fn run_line(&mut self, line: &str) -> Result<Reply> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        let text = match command {
            Command::Library => self.render_library(),
            Command::Add { filename, position } => {
                self.session
                    .add_from_library(&self.library, &filename, position)?;
                format!("added {filename} ({} in playlist)", self.session.playlist().size())
            }
            Command::Remove(index) => match self.session.remove(index) {
                Some(track) => format!("removed {}", track.title),
                None => {
                    return Err(PlayerAppError::invalid_argument(
                        "remove",
                        format!("no playlist entry {index}"),
                    ))
                }
            },
            Command::List => self.render_playlist(),
            Command::Play(None) => {
                self.session.toggle_play();
                self.render_status()
            }
            Command::Play(Some(index)) => {
                self.session.toggle_play_index(index);
                self.render_status()
            }
            Command::Pause => {
                self.session.set_playing(false);
                self.render_status()
            }
            Command::Retry => {
                self.session.retry_playback()?;
                self.render_status()
            }
            Command::Next => {
                self.session.next();
                self.render_status()
            }
            Command::Prev => {
                self.session.prev();
                self.render_status()
            }
            Command::Select(index) => {
                self.session.select(index);
                self.render_status()
            }
            Command::Seek(seconds) => {
                self.session.seek(seconds);
                self.render_status()
            }
            Command::Volume(level) => {
                self.session.set_volume(level);
                self.render_volume()
            }
            Command::Mute => {
                self.session.toggle_mute();
                self.render_volume()
            }
            Command::Repeat => format!("repeat {:?}", self.session.toggle_repeat()).to_lowercase(),
            Command::Shuffle => format!("shuffle {:?}", self.session.toggle_shuffle()).to_lowercase(),
            Command::Tick(seconds) => {
                self.tick(seconds);
                self.render_status()
            }
            Command::End => {
                self.session.handle_device_event(DeviceEvent::Ended);
                self.render_status()
            }
            Command::Status => self.render_status(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    /// Advance the simulated clock and feed its events back in
    fn tick(&mut self, seconds: f64) {
        let events = self.session.with_device_mut(|device| device.tick(seconds));
        for event in events {
            self.session.handle_device_event(event);
        }
    }

    pub fn session(&self) -> &PlayerSession<SimulatedDevice> {
        &self.session
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    fn render_library(&self) -> String {
        if self.library.is_empty() {
            return "library is empty".to_string();
        }
        let mut out = String::new();
        for track in self.library.tracks() {
            let _ = writeln!(
                out,
                "{:<24} {} - {} ({})",
                track.filename,
                track.title,
                track.display_author(),
                duration_label(track)
            );
        }
        out.trim_end().to_string()
    }

    fn render_playlist(&self) -> String {
        let state = self.session.state();
        if state.is_empty() {
            return "playlist is empty".to_string();
        }
        let mut out = String::new();
        for (index, track) in state.tracks.iter().enumerate() {
            let marker = if state.current_index == Some(index) { '*' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {index:>3}  [{}] {} - {}",
                track.initial(),
                track.title,
                track.display_author()
            );
        }
        out.trim_end().to_string()
    }

    fn render_status(&self) -> String {
        let state = self.session.state();
        let Some(track) = state.current_track() else {
            return "stopped: playlist is empty".to_string();
        };

        let transport = if state.playing { "playing" } else { "paused" };
        let (time, blocked) = self
            .session
            .with_adapter(|a| (a.time().label(), a.last_error().map(ToString::to_string)));

        let mut out = format!(
            "{transport} {}/{} {} - {} [{time}]",
            state.current_index_or_unset() + 1,
            state.len(),
            track.title,
            track.display_author()
        );
        if let Some(reason) = blocked {
            warn!(%reason, "device is not playing");
            let _ = write!(out, " (device: {reason})");
        }
        out
    }

    fn render_volume(&self) -> String {
        self.session.with_adapter(|a| {
            let volume = a.volume();
            let indicator = match volume.indicator() {
                VolumeIndicator::Off => "off",
                VolumeIndicator::Low => "low",
                VolumeIndicator::High => "high",
            };
            format!(
                "volume {:.0}%{} ({indicator})",
                volume.level() * 100.0,
                if volume.is_muted() { " muted" } else { "" }
            )
        })
    }
}

fn duration_label(track: &Track) -> String {
    track
        .duration_hint()
        .map_or_else(|| "-:--".to_string(), |d| format_time(d.as_secs_f64()))
}
