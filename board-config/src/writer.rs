//! Settings serializer
//!
//! Walks the schema in table order and writes one line per persisted option
//! in a form the parser reads back to the same value. Text picks between
//! the brace and the quote grammar, file names between three quote styles.

use crate::engine::OptionEngine;
use crate::host::Host;
use crate::schema::{OptionDescriptor, OptionKind};
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

const HEADER: &[&str] = &[
    ";",
    "; You can edit the values of options that are already set in this file,",
    "; but if you add other options, the next Save Settings will not save them.",
    "; Use a shortcut, an @indirection file, or a .bat file instead.",
    ";",
];

/// Encode free text as a brace or quote token
///
/// Multi-line and backslash-carrying text goes in braces when it has no
/// `}` to end the block early. Carriage returns always take the quote form
/// since file sources drop them.
pub fn quote_text(value: &str) -> String {
    if (value.contains('\\') || value.contains('\n'))
        && !value.contains('}')
        && !value.contains('\r')
    {
        return format!("{{{}}}", value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c < ' ' => out.push_str(&format!("\\{:03o}", c as u32)),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Encode a file name, whose quotes never carry escapes
///
/// A name containing `"`, `'` and `}` all at once has no exact encoding and
/// is written in double quotes anyway.
pub fn quote_path(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{}\"", value)
    } else if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('}') {
        format!("{{{}}}", value)
    } else {
        format!("\"{}\"", value)
    }
}

/// Turn a leading data directory back into `~~`
pub fn collapse_data_dir(value: &str, data_dir: Option<&str>) -> String {
    match data_dir {
        Some(dir) if !dir.is_empty() => match value.strip_prefix(dir) {
            Some(rest) => format!("~~{}", rest),
            None => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Value produced by a host hook, bare when that reads back unchanged
fn delegated(value: String) -> String {
    let bare = !value.is_empty()
        && !value.contains(char::is_whitespace)
        && !value.starts_with(['"', '\'', '{']);
    if bare {
        value
    } else {
        quote_text(&value)
    }
}

/// Lines for one descriptor, whether or not it is persisted
pub fn encode<S, H: Host<S>>(
    engine: &OptionEngine<S, H>,
    state: &S,
    d: &OptionDescriptor<S>,
) -> Vec<String> {
    let host = engine.host();
    let dialect = engine.config().dialect;
    let line = |value: &str| format!("{}{}{}{}", dialect.marker(), d.name, dialect.separator(), value);
    let flag = || vec![format!("{}{}", dialect.marker(), d.name)];

    match &d.kind {
        OptionKind::String(slot) => vec![line(&quote_text(slot.get(state)))],
        OptionKind::Filename(slot) => {
            let value = collapse_data_dir(slot.get(state), host.data_dir());
            vec![line(&quote_path(&value))]
        }
        OptionKind::Int(slot) | OptionKind::Z(slot) => vec![line(&slot.get(state).to_string())],
        OptionKind::X { slot, origin } | OptionKind::Y { slot, origin } => {
            let relative = slot.get(state).wrapping_sub(*origin.get(state));
            vec![line(&relative.to_string())]
        }
        OptionKind::Float(slot) => vec![line(&slot.get(state).to_string())],
        OptionKind::Boolean(slot) => vec![line(if *slot.get(state) { "true" } else { "false" })],
        OptionKind::True(slot) if *slot.get(state) => flag(),
        OptionKind::False(slot) if !*slot.get(state) => flag(),
        OptionKind::Color(index) => host
            .color_text(state, *index)
            .map(|v| line(&delegated(v)))
            .into_iter()
            .collect(),
        OptionKind::Attribs(index) => host
            .text_attribs_text(state, *index)
            .map(|v| line(&delegated(v)))
            .into_iter()
            .collect(),
        OptionKind::Font(index) => host
            .font_texts(state, *index)
            .into_iter()
            .map(|v| line(&delegated(v)))
            .collect(),
        OptionKind::BoardSize => host
            .board_size_text(state)
            .map(|v| line(&delegated(v)))
            .into_iter()
            .collect(),
        OptionKind::CommSettings => host
            .comm_settings_text(state)
            .map(|v| line(&delegated(v)))
            .into_iter()
            .collect(),
        // Not suitable for saving
        OptionKind::True(_)
        | OptionKind::False(_)
        | OptionKind::Two(_)
        | OptionKind::SettingsFilename(_)
        | OptionKind::BackupSettingsFile(_)
        | OptionKind::Install(_)
        | OptionKind::Master
        | OptionKind::None => Vec::new(),
    }
}

/// Write the header and every persisted option
pub fn write_settings<S, H: Host<S>, W: Write>(
    engine: &OptionEngine<S, H>,
    state: &S,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", HEADER[0])?;
    writeln!(out, "; {} Save Settings file", engine.config().package)?;
    for line in HEADER {
        writeln!(out, "{}", line)?;
    }

    let mut count = 0;
    for d in engine.schema().descriptors().iter().filter(|d| d.persist) {
        for line in encode(engine, state, d) {
            writeln!(out, "{}", line)?;
            count += 1;
        }
    }

    debug!("Serialized {} option lines", count);
    Ok(())
}

/// Save settings to `path`, creating its directory if needed
pub fn save_to_path<S, H: Host<S>>(engine: &OptionEngine<S, H>, state: &S, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = BufWriter::new(File::create(path)?);
    write_settings(engine, state, &mut out)?;
    out.flush()?;

    info!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NoHooks;
    use crate::lens;
    use crate::schema::Schema;

    #[derive(Default)]
    struct State {
        name: String,
        hidden: String,
        x: i32,
        origin: i32,
        on: bool,
        off: bool,
    }

    fn engine() -> OptionEngine<State, NoHooks> {
        let schema = Schema::builder()
            .option(OptionDescriptor::new("name", OptionKind::String(lens!(State, name))).persist(true))
            .option(OptionDescriptor::new("hidden", OptionKind::String(lens!(State, hidden))))
            .option(
                OptionDescriptor::new(
                    "x",
                    OptionKind::X {
                        slot: lens!(State, x),
                        origin: lens!(State, origin),
                    },
                )
                .persist(true),
            )
            .option(OptionDescriptor::new("on", OptionKind::True(lens!(State, on))).persist(true))
            .option(OptionDescriptor::new("off", OptionKind::False(lens!(State, off))).persist(true))
            .build()
            .unwrap();
        OptionEngine::new(schema, NoHooks)
            .with_config(crate::EngineConfig::default().with_dialect(crate::Dialect::Unix))
    }

    #[test]
    fn test_quote_text_forms() {
        assert_eq!(quote_text("plain"), "\"plain\"");
        assert_eq!(quote_text(r"C:\dir"), r"{C:\dir}");
        assert_eq!(quote_text("two\nlines"), "{two\nlines}");
        assert_eq!(quote_text("a}\nb"), "\"a}\\nb\"");
        assert_eq!(quote_text("say \"hi\"\t\u{1}"), "\"say \\\"hi\\\"\\t\\001\"");
        assert_eq!(quote_text("cr\r\\"), "\"cr\\r\\\\\"");
    }

    #[test]
    fn test_quote_path_forms() {
        assert_eq!(quote_path(r"C:\a b.pgn"), r#""C:\a b.pgn""#);
        assert_eq!(quote_path(r#"say "x""#), r#"'say "x"'"#);
        assert_eq!(quote_path(r#"it's "x""#), r#"{it's "x"}"#);
    }

    #[test]
    fn test_collapse_data_dir() {
        assert_eq!(collapse_data_dir("/usr/share/board/a.png", Some("/usr/share/board")), "~~/a.png");
        assert_eq!(collapse_data_dir("/elsewhere", Some("/usr/share/board")), "/elsewhere");
        assert_eq!(collapse_data_dir("/x", None), "/x");
    }

    #[test]
    fn test_persist_and_polarity() {
        let engine = engine();
        let state = State {
            name: "n".to_string(),
            hidden: "secret".to_string(),
            x: 130,
            origin: 100,
            on: false,
            off: false,
        };

        let mut out = Vec::new();
        write_settings(&engine, &state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(";\n; board "));
        assert!(text.contains("\n-name \"n\"\n"));
        assert!(text.contains("\n-x 30\n"));
        assert!(text.contains("\n-off\n"));
        assert!(!text.contains("-on"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_save_to_path_creates_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("board.rc");
        save_to_path(&engine(), &State::default(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("-name \"\""));
    }
}
