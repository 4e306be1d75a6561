//! Option listing generated from the schema

use crate::config::Dialect;
use crate::schema::{OptionDescriptor, OptionKind, Schema};

const COLUMN: usize = 39;

const LEGEND: &str = "\
(N = integer, TF = true or false, STR = text string, FILE = filename,
 Nx, Ny = relative coordinates, COL = color, FONT = font spec,
 SIZE = board-size spec(s)
 Within parentheses are short forms, or options to set to true or false.
 Persistent options (saved in the settings file) are marked with *)
";

/// Placeholder shown after an option name for its value
pub fn type_hint<S>(kind: &OptionKind<S>) -> &'static str {
    match kind {
        OptionKind::Int(_) | OptionKind::Z(_) => " N",
        OptionKind::String(_) => " STR",
        OptionKind::Boolean(_) => " TF",
        OptionKind::Filename(_)
        | OptionKind::SettingsFilename(_)
        | OptionKind::BackupSettingsFile(_) => " FILE",
        OptionKind::X { .. } => " Nx",
        OptionKind::Y { .. } => " Ny",
        OptionKind::Attribs(_) => " TEXTCOL",
        OptionKind::Color(_) => " COL",
        OptionKind::Font(_) => " FONT",
        OptionKind::BoardSize => " SIZE",
        OptionKind::Float(_) => " FLOAT",
        _ => "",
    }
}

/// One primary option and the aliases that follow it in the table
fn entry<S>(marker: char, primary: &OptionDescriptor<S>, aliases: &[OptionDescriptor<S>]) -> String {
    let mut text = format!("{}{}{}", marker, primary.name, type_hint(&primary.kind));
    if primary.persist {
        text.push('*');
    }

    let shown: Vec<String> = aliases
        .iter()
        .filter(|a| !a.name.starts_with('-'))
        .map(|a| format!("{}{}{}", marker, a.name, type_hint(&a.kind)))
        .collect();
    if !shown.is_empty() {
        text.push_str(" (");
        text.push_str(&shown.join(" "));
        text.push(')');
    }
    text
}

/// Listing of every visible option, two to a line when they fit
pub fn usage<S>(schema: &Schema<S>, dialect: Dialect) -> String {
    let mut out = format!("\nboard accepts the following options:\n{}\n", LEGEND);
    let mut line = String::new();

    let descriptors = schema.descriptors();
    let mut i = 0;
    while i < descriptors.len() {
        let primary = &descriptors[i];
        let mut end = i + 1;
        while end < descriptors.len() && descriptors[end].alias {
            end += 1;
        }

        if !primary.hidden && !primary.alias {
            line.push_str(&entry(dialect.marker(), primary, &descriptors[i + 1..end]));
            if line.len() > COLUMN {
                out.push_str(&line);
                out.push('\n');
                line.clear();
            } else {
                while line.len() < COLUMN {
                    line.push(' ');
                }
            }
        }
        i = end;
    }

    if !line.is_empty() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
