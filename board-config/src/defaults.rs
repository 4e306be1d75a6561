//! Default-application pass

use crate::host::Host;
use crate::schema::{DefaultValue, OptionKind, Schema};
use crate::{ConfigError, Result};
use tracing::debug;

/// Write every descriptor's default into `state`
///
/// Descriptors without a default are left untouched. Text defaults are
/// stored as written, with no `~~` expansion; delegated kinds hand their
/// default text to the host hook.
pub fn apply_defaults<S, H: Host<S>>(schema: &Schema<S>, host: &H, state: &mut S) -> Result<()> {
    let mut applied = 0;

    for d in schema.descriptors() {
        let Some(default) = d.default else {
            continue;
        };

        match (&d.kind, default) {
            (
                OptionKind::String(slot)
                | OptionKind::Filename(slot)
                | OptionKind::Install(slot)
                | OptionKind::BackupSettingsFile(slot)
                | OptionKind::SettingsFilename(Some(slot)),
                DefaultValue::Text(text),
            ) => slot.set(state, text.to_string()),
            (
                OptionKind::Int(slot)
                | OptionKind::Z(slot)
                | OptionKind::X { slot, .. }
                | OptionKind::Y { slot, .. },
                DefaultValue::Int(v),
            ) => slot.set(state, v),
            (OptionKind::Two(slot), DefaultValue::Int(v)) => {
                let level = u8::try_from(v).map_err(|_| {
                    ConfigError::Schema(format!("default {} out of range for {}", v, d.name))
                })?;
                slot.set(state, level);
            }
            (OptionKind::Float(slot), DefaultValue::Float(v)) => slot.set(state, v),
            (OptionKind::Float(slot), DefaultValue::Int(v)) => slot.set(state, v as f32),
            (
                OptionKind::Boolean(slot) | OptionKind::True(slot) | OptionKind::False(slot),
                DefaultValue::Bool(v),
            ) => slot.set(state, v),
            (OptionKind::Color(index), DefaultValue::Text(text)) => {
                host.parse_color(state, *index, text)?
            }
            (OptionKind::Attribs(index), DefaultValue::Text(text)) => {
                host.parse_text_attribs(state, *index, text)?
            }
            (OptionKind::Font(index), DefaultValue::Text(text)) => {
                host.parse_font(state, *index, text)?
            }
            (OptionKind::BoardSize, DefaultValue::Text(text)) => host.parse_board_size(state, text)?,
            (OptionKind::CommSettings, DefaultValue::Text(text)) => {
                host.parse_comm_settings(state, text)?
            }
            _ => {
                return Err(ConfigError::Schema(format!(
                    "default {:?} does not fit {} option {}",
                    default,
                    d.kind.tag(),
                    d.name
                )))
            }
        }
        applied += 1;
    }

    debug!("Applied {} option defaults", applied);
    Ok(())
}
