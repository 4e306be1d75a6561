//! Command-line joining

/// Join program arguments into one option line
///
/// Arguments that are empty or contain whitespace are wrapped in braces so
/// they stay a single value token, unless they already open a brace block.
pub fn join_args<I, A>(args: I) -> String
where
    I: IntoIterator<Item = A>,
    A: AsRef<str>,
{
    let mut line = String::new();
    for arg in args {
        let arg = arg.as_ref();
        let needs_braces = arg.is_empty() || arg.contains([' ', '\n', '\t']);
        if needs_braces && !arg.starts_with('{') {
            line.push('{');
            line.push_str(arg);
            line.push('}');
        } else {
            line.push_str(arg);
        }
        line.push(' ');
    }
    line.pop();
    line
}
