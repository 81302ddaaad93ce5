//! Terminal rendering

use cue_playback::presentation::{PageLink, RowView, TransportIcon, VolumeIcon};
use cue_playback::{PlaybackEvent, PlayerView, Presenter};
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::warn;

/// Writes views to a terminal
///
/// The track table is reprinted only when it changes; progress ticks
/// rewrite the status line in place.
pub struct TerminalPresenter<W: Write> {
    out: W,
    last_table: Option<String>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_table: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, view: &PlayerView, events: &[PlaybackEvent]) -> io::Result<()> {
        let table = format_table(view);
        let messages = format_messages(events);
        let table_changed = self.last_table.as_deref() != Some(table.as_str());

        if table_changed || !messages.is_empty() {
            writeln!(self.out)?;
            if table_changed {
                write!(self.out, "{table}")?;
            }
            write!(self.out, "{messages}")?;
            self.last_table = Some(table);
        }
        write!(self.out, "\r{}", format_status(view))?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &PlayerView, events: &[PlaybackEvent]) {
        if let Err(e) = self.write_frame(view, events) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

/// Track rows and pagination
pub fn format_table(view: &PlayerView) -> String {
    let mut out = String::new();
    if view.loading {
        out.push_str("  loading...\n");
        return out;
    }
    if view.rows.is_empty() {
        out.push_str("  (no tracks)\n");
    }
    for row in &view.rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    if !view.pagination.is_empty() {
        out.push_str("  pages:");
        for link in &view.pagination {
            match link {
                PageLink::Page {
                    number,
                    current: true,
                } => {
                    let _ = write!(out, " [{number}]");
                }
                PageLink::Page { number, .. } => {
                    let _ = write!(out, " {number}");
                }
                PageLink::Ellipsis => out.push_str(" ..."),
            }
        }
        out.push('\n');
    }
    out
}

fn format_row(row: &RowView) -> String {
    let marker = match (row.highlighted, row.icon) {
        (true, TransportIcon::Pause) => ">",
        (true, TransportIcon::Play) => "=",
        (false, _) => " ",
    };
    let embed = if row.embed_open { "  [watching]" } else { "" };
    format!(
        "{marker} {:>6}  {} - {}{embed}",
        row.track_id.get(),
        row.title,
        row.producer
    )
}

/// Notices and external links carried by `events`
pub fn format_messages(events: &[PlaybackEvent]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            PlaybackEvent::Notice { kind, message } => {
                let _ = writeln!(out, "! [{kind:?}] {message}");
            }
            PlaybackEvent::OpenExternal { url } => {
                let _ = writeln!(out, "-> open {url}");
            }
            PlaybackEvent::CatalogueFailed { message } => {
                let _ = writeln!(out, "! Error loading tracks: {message}");
            }
            _ => {}
        }
    }
    out
}

/// One-line transport bar
pub fn format_status(view: &PlayerView) -> String {
    if !view.transport_visible {
        return String::from("(stopped)");
    }

    let face = match view.play_icon {
        TransportIcon::Pause => "||",
        TransportIcon::Play => "> ",
    };
    let title = view
        .now_playing
        .as_ref()
        .map(|record| format!("{} - {}", record.title, record.producer))
        .unwrap_or_default();
    let volume = match view.volume_icon {
        VolumeIcon::Muted => "muted".to_string(),
        VolumeIcon::Off => "vol off".to_string(),
        VolumeIcon::Low | VolumeIcon::High => format!("vol {}", view.volume),
    };
    let flags = [
        (view.shuffle, "shuffle"),
        (view.repeat, "repeat"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(" ");

    format!(
        "{face} {title}  {} / {} ({:.0}%)  {volume}  {flags}",
        view.progress.elapsed, view.progress.duration, view.progress.percent
    )
    .trim_end()
    .to_string()
}
