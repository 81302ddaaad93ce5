//! Keyboard commands

use cue_playback::{CatalogueQuery, Intent, PageLimit, SessionSnapshot, TrackId};
use std::time::Duration;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  p <id>            play a row            t                 play/pause
  n / b             next / previous       s                 stop
  shuffle [on|off]  toggle shuffle        repeat [on|off]   toggle repeat
  v <0-100>         volume                m                 mute/unmute
  seek <percent>    seek                  seekto <m:ss>     seek to a time
  w <id> / c <id>   watch / close inline
  page <n>          go to page            limit <n|all>     rows per page
  filter <k>=<v>    set a filter          sort <col> [asc|desc]
  scope <id|none>   restrict to a playlist
  playlists         list playlists        add <pl> <id> / rm <pl> <id>
  status            session as JSON       h                 help
  q                 quit";

/// What one input line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(Intent),
    ListPlaylists,
    AddToPlaylist { playlist: u64, track: TrackId },
    RemoveFromPlaylist { playlist: u64, track: TrackId },
    Status,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (h for help)")]
    Unknown(String),

    #[error("{command}: expected {expected}")]
    Usage {
        command: String,
        expected: &'static str,
    },
}

/// Parse one input line
///
/// Toggles (shuffle, repeat without an argument) and query edits are
/// resolved against the current session and query.
pub fn parse(
    line: &str,
    session: &SessionSnapshot,
    query: &CatalogueQuery,
) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Command::Nothing);
    };
    let args: Vec<&str> = words.collect();
    let usage = |expected| CommandError::Usage {
        command: command.to_string(),
        expected,
    };

    let intent = match command {
        "p" | "play" => Intent::PlayTrack(track_arg(&args).ok_or_else(|| usage("a track id"))?),
        "t" | "toggle" => Intent::TogglePlayPause,
        "n" | "next" => Intent::Next,
        "b" | "prev" | "previous" => Intent::Previous,
        "s" | "stop" => Intent::Stop,
        "shuffle" => Intent::SetShuffle(
            switch_arg(&args, session.shuffle).ok_or_else(|| usage("on or off"))?,
        ),
        "repeat" => Intent::SetRepeat(
            switch_arg(&args, session.repeat).ok_or_else(|| usage("on or off"))?,
        ),
        "v" | "volume" => Intent::SetVolume(
            args.first()
                .and_then(|level| level.parse::<u8>().ok())
                .filter(|level| *level <= 100)
                .ok_or_else(|| usage("a level between 0 and 100"))?,
        ),
        "m" | "mute" => Intent::ToggleMute,
        "seek" => Intent::SeekPercent(
            args.first()
                .and_then(|percent| percent.trim_end_matches('%').parse::<f64>().ok())
                .filter(|percent| (0.0..=100.0).contains(percent))
                .ok_or_else(|| usage("a percentage"))?,
        ),
        "seekto" => Intent::SeekDragEnd(
            args.first()
                .and_then(|time| parse_time(time))
                .ok_or_else(|| usage("a time such as 1:30"))?,
        ),
        "w" | "watch" => Intent::EnterEmbed(track_arg(&args).ok_or_else(|| usage("a track id"))?),
        "c" | "close" => Intent::ExitEmbed(track_arg(&args).ok_or_else(|| usage("a track id"))?),
        "page" | "g" => Intent::GoToPage(
            args.first()
                .and_then(|page| page.parse::<u32>().ok())
                .filter(|page| *page > 0)
                .ok_or_else(|| usage("a page number"))?,
        ),
        "limit" => {
            let limit = match args.first() {
                Some(&"all") => PageLimit::All,
                Some(n) => match n.parse::<u32>() {
                    Ok(0) => PageLimit::All,
                    Ok(n) => PageLimit::Count(n),
                    Err(_) => return Err(usage("a number or all")),
                },
                None => return Err(usage("a number or all")),
            };
            Intent::ChangeQuery(CatalogueQuery {
                limit,
                ..query.clone()
            })
        }
        "filter" => {
            let (key, value) = args
                .first()
                .and_then(|pair| pair.split_once('='))
                .ok_or_else(|| usage("key=value"))?;
            let mut next = query.clone();
            // Filter values may contain spaces
            let value = std::iter::once(value)
                .chain(args.iter().skip(1).copied())
                .collect::<Vec<_>>()
                .join(" ");
            if value.is_empty() {
                next.filters.remove(key);
            } else {
                next.filters.insert(key.to_string(), value);
            }
            Intent::ChangeQuery(next)
        }
        "sort" => {
            let column = args.first().ok_or_else(|| usage("a column"))?;
            let direction = match args.get(1) {
                None => None,
                Some(&dir @ ("asc" | "desc")) => Some(dir.to_string()),
                Some(_) => return Err(usage("asc or desc")),
            };
            Intent::ChangeQuery(CatalogueQuery {
                sort_by: Some((*column).to_string()),
                sort_dir: direction.or_else(|| query.sort_dir.clone()),
                ..query.clone()
            })
        }
        "scope" => {
            let scope = match args.first() {
                Some(&"none") => None,
                Some(id) => Some(id.parse::<u64>().map_err(|_| usage("a playlist id or none"))?),
                None => return Err(usage("a playlist id or none")),
            };
            Intent::ChangeQuery(CatalogueQuery {
                scope,
                ..query.clone()
            })
        }
        "playlists" => return Ok(Command::ListPlaylists),
        "add" | "rm" => {
            let (playlist, track) = match args.as_slice() {
                [playlist, track] => (
                    playlist.parse::<u64>().ok(),
                    track.parse::<u64>().ok().map(TrackId),
                ),
                _ => (None, None),
            };
            let (Some(playlist), Some(track)) = (playlist, track) else {
                return Err(usage("a playlist id and a track id"));
            };
            return Ok(if command == "add" {
                Command::AddToPlaylist { playlist, track }
            } else {
                Command::RemoveFromPlaylist { playlist, track }
            });
        }
        "status" => return Ok(Command::Status),
        "h" | "help" | "?" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Command::Intent(intent))
}

fn track_arg(args: &[&str]) -> Option<TrackId> {
    args.first()?.parse::<u64>().ok().map(TrackId)
}

/// `on`/`off`, or the opposite of `current` when omitted
fn switch_arg(args: &[&str], current: bool) -> Option<bool> {
    match args.first() {
        None => Some(!current),
        Some(&"on") => Some(true),
        Some(&"off") => Some(false),
        Some(_) => None,
    }
}

/// `m:ss` or plain seconds
fn parse_time(text: &str) -> Option<Duration> {
    match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.parse::<u64>().ok()?;
            let seconds = seconds.parse::<u64>().ok().filter(|s| *s < 60)?;
            Some(Duration::from_secs(minutes * 60 + seconds))
        }
        None => text.parse::<u64>().ok().map(Duration::from_secs),
    }
}
