//! Chain rendering: the full multi-line trace and the short summary line.

use std::fmt;

use parking_lot::RwLock;

use crate::error::Error;

/// The two render modes for a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Multi-line: every link's message and origin, joined by `Caused by:`.
    Full,
    /// Single line: colon-joined messages, outermost first.
    Short,
}

static DEFAULT_FORMAT: RwLock<FormatMode> = RwLock::new(FormatMode::Full);

/// The process-wide render mode used when no per-call flag selects one.
pub fn default_format() -> FormatMode {
    *DEFAULT_FORMAT.read()
}

/// Replaces the process-wide default render mode.
///
/// Configure before spawning concurrent work; see the crate docs for the
/// global-configuration lifecycle.
pub fn set_default_format(mode: FormatMode) {
    *DEFAULT_FORMAT.write() = mode;
}

/// Display dispatch for [`Error`].
///
/// `{:+}` forces [`FormatMode::Full`], `{:#}` forces [`FormatMode::Short`];
/// both or neither fall back to [`default_format`]. The rendered text goes
/// through [`fmt::Formatter::pad`], so width, fill, alignment and precision
/// behave as they do for plain strings.
pub(crate) fn display(err: &Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mode = match (f.sign_plus(), f.alternate()) {
        (true, false) => FormatMode::Full,
        (false, true) => FormatMode::Short,
        _ => default_format(),
    };
    let text = match mode {
        FormatMode::Full => format_full(err),
        FormatMode::Short => format_short(err),
    };
    f.pad(&text)
}

/// Renders the whole chain, one link per message line, outermost first.
///
/// Foreign causes terminate the walk: their own `Display` text is emitted
/// after `Caused by:` and nothing below them is introspected.
pub fn format_full(err: &Error) -> String {
    let mut out = String::new();
    let mut curr = err;

    loop {
        out.push_str(curr.message());

        let origin = curr.origin();
        if !origin.is_empty() {
            newline(&mut out);
            if origin.function.is_empty() {
                out.push_str(&format!(" --- at {}:{} ---", origin.file, origin.line));
            } else {
                out.push_str(&format!(
                    " --- at {}:{} ({}) ---",
                    origin.file, origin.line, origin.function
                ));
            }
        }

        let Some(cause) = curr.cause() else {
            break;
        };
        newline(&mut out);
        match cause.downcast_ref::<Error>() {
            Some(next) => {
                // An empty intermediate message drops the prefix but the
                // walk continues through the rest of the chain.
                if !next.message().is_empty() {
                    out.push_str("Caused by: ");
                }
                curr = next;
            }
            None => {
                out.push_str("Caused by: ");
                out.push_str(&cause.to_string());
                break;
            }
        }
    }

    out
}

/// Renders the chain as one colon-joined line, outermost first.
///
/// Empty messages are skipped without doubling the separator; a trailing
/// foreign cause contributes its own `Display` text.
pub fn format_short(err: &Error) -> String {
    let mut out = String::new();
    let mut curr = err;

    loop {
        concat(&mut out, curr.message());
        match curr.cause().and_then(|c| c.downcast_ref::<Error>()) {
            Some(next) => curr = next,
            None => break,
        }
    }
    if let Some(foreign) = curr.cause() {
        concat(&mut out, &foreign.to_string());
    }

    out
}

fn newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn concat(out: &mut String, msg: &str) {
    if !out.is_empty() && !msg.is_empty() {
        out.push_str(": ");
    }
    out.push_str(msg);
}
