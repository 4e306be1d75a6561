//! Value decoding: raw token text into typed storage

use crate::engine::OptionEngine;
use crate::host::Host;
use crate::parser::Scope;
use crate::schema::{OptionDescriptor, OptionKind};
use crate::{ConfigError, Result};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Parse an optionally signed run of decimal digits
///
/// An empty digit run reads as 0; anything else that is not a digit is
/// rejected.
pub fn validate_int(s: &str) -> Result<i32> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::BadInteger(s.to_string()));
    }
    if digits.is_empty() {
        return Ok(0);
    }
    s.parse().map_err(|_| ConfigError::BadInteger(s.to_string()))
}

/// Decide a boolean by its first character
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.chars().next() {
        Some('t' | 'T') => Ok(true),
        Some('f' | 'F') => Ok(false),
        _ => Err(ConfigError::BadBoolean(s.to_string())),
    }
}

/// Parse the longest numeric prefix, 0 when there is none
pub fn lenient_float(s: &str) -> f32 {
    let t = s.trim_start();
    let b = t.as_bytes();
    let mut i = 0;

    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let lower = t[i..].to_ascii_lowercase();
    for word in ["infinity", "inf", "nan"] {
        if lower.starts_with(word) {
            return t[..i + word.len()].parse().unwrap_or(0.0);
        }
    }

    let mut digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if b.get(j).is_some_and(|c| c.is_ascii_digit()) {
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    t[..i].parse().unwrap_or(0.0)
}

/// Substitute the data directory for a leading `~~`
pub fn expand_data_dir(value: &str, data_dir: Option<&str>) -> String {
    match (value.strip_prefix("~~"), data_dir) {
        (Some(rest), Some(dir)) => format!("{}{}", dir, rest),
        _ => value.to_string(),
    }
}

/// Append `value` as a new line unless the text already contains it
pub fn accumulate(existing: &mut String, value: &str) {
    if !existing.contains(value) {
        existing.push_str(value);
        existing.push('\n');
    }
}

/// Append a date-stamped line to an existing settings file, once
pub fn append_master_line(path: &Path, line: &str) -> Result<()> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Ok(()),
    };
    if content.lines().any(|l| l == line) {
        return Ok(());
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut f = std::fs::OpenOptions::new().append(true).open(path)?;
    writeln!(f, "-date {:10}\n{}", now, line)?;
    Ok(())
}

/// Store a decoded value token through `descriptor`
pub(crate) fn apply<S, H: Host<S>>(
    engine: &OptionEngine<S, H>,
    state: &mut S,
    descriptor: &OptionDescriptor<S>,
    value: &str,
    scope: &mut Scope<'_>,
) -> Result<()> {
    let host = engine.host();

    match &descriptor.kind {
        OptionKind::Int(slot) => slot.set(state, validate_int(value)?),
        OptionKind::X { slot, origin } | OptionKind::Y { slot, origin } => {
            let base = *origin.get(state);
            slot.set(state, validate_int(value)?.wrapping_add(base));
        }
        OptionKind::Z(slot) => {
            slot.set(state, validate_int(value)?);
            host.ensure_on_screen(state);
        }
        OptionKind::Float(slot) => slot.set(state, lenient_float(value)),
        OptionKind::String(slot) | OptionKind::Filename(slot) => {
            slot.set(state, expand_data_dir(value, host.data_dir()))
        }
        OptionKind::BackupSettingsFile(slot) => {
            if engine.is_default_settings_file(slot.get(state)) {
                read_settings(engine, state, value, Some(*slot), scope)?;
            }
        }
        OptionKind::SettingsFilename(slot) => read_settings(engine, state, value, *slot, scope)?,
        OptionKind::Boolean(slot) => slot.set(state, parse_bool(value)?),
        OptionKind::True(slot) => slot.set(state, true),
        OptionKind::False(slot) => slot.set(state, false),
        OptionKind::Two(slot) => slot.set(state, 2),
        OptionKind::Color(index) => host.parse_color(state, *index, value)?,
        OptionKind::Attribs(index) => host.parse_text_attribs(state, *index, value)?,
        OptionKind::Font(index) => host.parse_font(state, *index, value)?,
        OptionKind::BoardSize => host.parse_board_size(state, value)?,
        OptionKind::CommSettings => host.parse_comm_settings(state, value)?,
        OptionKind::Master => {
            let path = host.search_path(&engine.config().settings_file);
            append_master_line(&path, value)?;
        }
        OptionKind::Install(slot) => {
            if host.install_allowed(state) {
                accumulate(slot.get_mut(state), value);
            } else {
                debug!("Skipping install of {}, settings saved since", value);
            }
        }
        OptionKind::None => return Err(ConfigError::UnexpectedPositional(value.to_string())),
    }

    debug!(option = descriptor.name, kind = descriptor.kind.tag(), "applied");
    Ok(())
}

fn read_settings<S, H: Host<S>>(
    engine: &OptionEngine<S, H>,
    state: &mut S,
    name: &str,
    storage: Option<crate::schema::Lens<S, String>>,
    scope: &mut Scope<'_>,
) -> Result<()> {
    if engine.read_settings_file(state, name, storage, scope)? || storage.is_some() {
        Ok(())
    } else {
        Err(ConfigError::IndirectionOpenFailed(name.to_string()))
    }
}
