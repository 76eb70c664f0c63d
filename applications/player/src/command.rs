//! Line-oriented player commands

use crate::error::{PlayerAppError, Result};
use cadence_playback::InsertPosition;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  library                          list tracks available to add
  add <filename> [start|end|<i>]   add a library track to the playlist
  remove <i>                       remove playlist entry i
  list                             show the playlist
  play [<i>]                       toggle play, or play/pause entry i
  pause                            pause
  retry                            retry a start the device refused
  next | prev                      step through the playlist
  select <i>                       select entry i without starting it
  seek <secs>                      seek within the current track
  volume <0..1>                    set the volume
  mute | repeat | shuffle          toggle
  tick <secs>                      advance the device clock
  end                              end the current track now
  status                           show what is playing
  help                             this text
  quit                             exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Library,
    Add {
        filename: String,
        position: InsertPosition,
    },
    Remove(i64),
    List,
    Play(Option<i64>),
    Pause,
    Retry,
    Next,
    Prev,
    Select(i64),
    Seek(f64),
    Volume(f32),
    Mute,
    Repeat,
    Shuffle,
    Tick(f64),
    End,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(PlayerAppError::UnknownCommand(String::new()));
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "library" | "lib" => Self::Library,
            "add" => parse_add(&args)?,
            "remove" | "rm" => Self::Remove(required(&args, "remove")?),
            "list" | "ls" => Self::List,
            "play" => Self::Play(optional(&args, "play")?),
            "pause" => Self::Pause,
            "retry" => Self::Retry,
            "next" => Self::Next,
            "prev" | "previous" => Self::Prev,
            "select" => Self::Select(required(&args, "select")?),
            "seek" => Self::Seek(required(&args, "seek")?),
            "volume" | "vol" => Self::Volume(required(&args, "volume")?),
            "mute" => Self::Mute,
            "repeat" => Self::Repeat,
            "shuffle" => Self::Shuffle,
            "tick" => Self::Tick(required(&args, "tick")?),
            "end" => Self::End,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(PlayerAppError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = PlayerAppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_add(args: &[&str]) -> Result<Command> {
    let (filename, position) = match args {
        [filename] => (*filename, InsertPosition::End),
        [filename, position] => (*filename, parse_position(position)?),
        [] => return Err(PlayerAppError::invalid_argument("add", "missing filename")),
        _ => return Err(PlayerAppError::invalid_argument("add", "too many arguments")),
    };
    Ok(Command::Add {
        filename: filename.to_string(),
        position,
    })
}

fn parse_position(raw: &str) -> Result<InsertPosition> {
    match raw {
        "start" | "first" => Ok(InsertPosition::Start),
        "end" | "last" => Ok(InsertPosition::End),
        index => index
            .parse()
            .map(InsertPosition::Index)
            .map_err(|_| PlayerAppError::invalid_argument("add", format!("bad position {index:?}"))),
    }
}

fn required<T: FromStr>(args: &[&str], command: &'static str) -> Result<T> {
    optional(args, command)?
        .ok_or_else(|| PlayerAppError::invalid_argument(command, "missing argument"))
}

fn optional<T: FromStr>(args: &[&str], command: &'static str) -> Result<Option<T>> {
    match args {
        [] => Ok(None),
        [raw] => raw
            .parse()
            .map(Some)
            .map_err(|_| PlayerAppError::invalid_argument(command, format!("cannot parse {raw:?}"))),
        _ => Err(PlayerAppError::invalid_argument(command, "too many arguments")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Command::parse("next").unwrap(), Command::Next);
        assert_eq!(Command::parse("  PREV ").unwrap(), Command::Prev);
        assert_eq!(Command::parse("play").unwrap(), Command::Play(None));
        assert_eq!(Command::parse("play 2").unwrap(), Command::Play(Some(2)));
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn parses_add_positions() {
        assert_eq!(
            Command::parse("add song.mp3").unwrap(),
            Command::Add {
                filename: "song.mp3".to_string(),
                position: InsertPosition::End
            }
        );
        assert_eq!(
            Command::parse("add song.mp3 start").unwrap(),
            Command::Add {
                filename: "song.mp3".to_string(),
                position: InsertPosition::Start
            }
        );
        assert_eq!(
            Command::parse("add song.mp3 -4").unwrap(),
            Command::Add {
                filename: "song.mp3".to_string(),
                position: InsertPosition::Index(-4)
            }
        );
        assert!(Command::parse("add song.mp3 middle").is_err());
        assert!(Command::parse("add").is_err());
    }

    #[test]
    fn numeric_arguments_are_checked() {
        assert_eq!(Command::parse("seek 12.5").unwrap(), Command::Seek(12.5));
        assert_eq!(Command::parse("volume 0.25").unwrap(), Command::Volume(0.25));
        assert_eq!(Command::parse("remove -1").unwrap(), Command::Remove(-1));

        assert!(matches!(
            Command::parse("select"),
            Err(PlayerAppError::InvalidArgument { command: "select", .. })
        ));
        assert!(Command::parse("tick soon").is_err());
        assert!(Command::parse("play 1 2").is_err());
    }

    #[test]
    fn unknown_and_empty_rejected() {
        assert!(matches!(
            Command::parse("dance"),
            Err(PlayerAppError::UnknownCommand(name)) if name == "dance"
        ));
        assert!(Command::parse("   ").is_err());
    }
}
