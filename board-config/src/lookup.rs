//! Option values as text, for `%name%` placeholders

use crate::schema::{OptionKind, Schema};

/// Current value of option `name` as text
///
/// Only text, file name, integer and boolean options have a text value.
pub fn value_text<S>(schema: &Schema<S>, state: &S, name: &str) -> Option<String> {
    match &schema.get(name)?.kind {
        OptionKind::String(slot) | OptionKind::Filename(slot) => Some(slot.get(state).clone()),
        OptionKind::Int(slot) => Some(slot.get(state).to_string()),
        OptionKind::Boolean(slot) => Some(slot.get(state).to_string()),
        _ => None,
    }
}

/// Replace each `%name%` with the value of option `name`
///
/// Placeholders naming no option with a text value, including `%%`, are
/// copied through unchanged.
pub fn expand_placeholders<S>(schema: &Schema<S>, state: &S, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('%') else {
            rest = &rest[start..];
            break;
        };

        match value_text(schema, state, &after[..end]) {
            Some(value) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                // Closing % may open the next placeholder
                out.push('%');
                out.push_str(&after[..end]);
                rest = &after[end..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens;
    use crate::schema::OptionDescriptor;

    #[derive(Default)]
    struct State {
        host: String,
        port: i32,
        verbose: bool,
        ratio: f32,
    }

    fn schema() -> Schema<State> {
        Schema::builder()
            .option(OptionDescriptor::new("icsHost", OptionKind::String(lens!(State, host))))
            .option(OptionDescriptor::new("icsPort", OptionKind::Int(lens!(State, port))))
            .option(OptionDescriptor::new("debug", OptionKind::Boolean(lens!(State, verbose))))
            .option(OptionDescriptor::new("ratio", OptionKind::Float(lens!(State, ratio))))
            .build()
            .unwrap()
    }

    fn state() -> State {
        State {
            host: "chessclub.com".to_string(),
            port: 5000,
            verbose: true,
            ratio: 0.5,
        }
    }

    #[test]
    fn test_value_text() {
        let (schema, state) = (schema(), state());
        assert_eq!(value_text(&schema, &state, "icsPort").as_deref(), Some("5000"));
        assert_eq!(value_text(&schema, &state, "debug").as_deref(), Some("true"));
        assert_eq!(value_text(&schema, &state, "ratio"), None);
        assert_eq!(value_text(&schema, &state, "missing"), None);
    }

    #[test]
    fn test_expand_placeholders() {
        let (schema, state) = (schema(), state());
        assert_eq!(
            expand_placeholders(&schema, &state, "timestamp %icsHost%:%icsPort%"),
            "timestamp chessclub.com:5000"
        );
        assert_eq!(expand_placeholders(&schema, &state, "100%% %nope% %"), "100%% %nope% %");
        assert_eq!(expand_placeholders(&schema, &state, "50%%icsPort%"), "50%5000");
    }
}
