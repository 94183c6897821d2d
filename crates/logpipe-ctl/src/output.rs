//! Styled terminal output for `logpipe-ctl`.
//!
//! Rendered configuration is the only thing written to stdout; status lines
//! go to stderr so `logpipe-ctl render ... > fluent.conf` stays clean.
//! `anstream` strips the ANSI codes when the stream is not a terminal.

use std::io::Write;

use anstyle::{AnsiColor, Color, Effects, Style};

const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const HEADER: Style = Style::new().effects(Effects::BOLD);
const DIM: Style = Style::new().effects(Effects::DIMMED);

/// Print a success message to stderr.
pub(crate) fn success(msg: impl std::fmt::Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{SUCCESS}✓ {msg}{SUCCESS:#}").ok();
}

/// Print an error message to stderr.
pub(crate) fn error(msg: impl std::fmt::Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

/// Print a warning message to stderr.
pub(crate) fn warning(msg: impl std::fmt::Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{WARNING}! {msg}{WARNING:#}").ok();
}

/// Print a bold section header to stdout.
pub(crate) fn header(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{HEADER}{msg}{HEADER:#}").ok();
}

/// Print a bulleted list item to stdout, with an optional dimmed note.
pub(crate) fn item(msg: impl std::fmt::Display, note: Option<&str>) {
    let mut out = anstream::stdout().lock();
    match note {
        Some(note) => writeln!(out, "  • {msg} {DIM}({note}){DIM:#}").ok(),
        None => writeln!(out, "  • {msg}").ok(),
    };
}

/// Write rendered output verbatim to stdout.
pub(crate) fn raw(text: &str) {
    let mut out = anstream::stdout().lock();
    out.write_all(text.as_bytes()).ok();
}

/// Help styling matching the palette above.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let title = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)))
        .effects(Effects::BOLD);
    clap::builder::Styles::styled()
        .header(title)
        .usage(title)
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(ERROR.effects(Effects::BOLD))
        .valid(SUCCESS)
        .invalid(WARNING)
}
