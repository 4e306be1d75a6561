//! Positional argument inference
//!
//! A bare token normally lands in the next positional slot. When its text
//! ends in a recognized suffix, or names a configured engine, it is
//! redirected to another option instead. Rules are tried in table order and
//! the first match wins.

use crate::host::Host;
use crate::schema::{Lens, OptionDescriptor, Schema};
use std::fmt;

/// Test applied to the decoded text of a bare token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Case-insensitive file extension, any of the listed ones
    Suffix(&'static [&'static str]),
    /// Nickname known to the host's engine list
    EngineNickname,
}

impl Matcher {
    pub fn matches<S, H: Host<S>>(&self, host: &H, state: &S, value: &str) -> bool {
        match self {
            Matcher::Suffix(suffixes) => suffixes.iter().any(|s| has_suffix(value, s)),
            Matcher::EngineNickname => host.is_engine_nickname(state, value),
        }
    }
}

/// Redirect of a bare token to the option at `target`
pub struct InferenceRule<S> {
    pub matcher: Matcher,
    pub target: usize,
    /// Mode flag raised when the rule fires
    pub effect: Option<Lens<S, bool>>,
}

impl<S> fmt::Debug for InferenceRule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceRule")
            .field("matcher", &self.matcher)
            .field("target", &self.target)
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

/// Pick the descriptor that receives a bare token and raise its mode flag
///
/// `slot` is the descriptor chosen by position; it is kept (and the schema's
/// fallback flag raised) when no rule matches.
pub fn resolve<'s, S, H: Host<S>>(
    schema: &'s Schema<S>,
    host: &H,
    state: &mut S,
    slot: &'s OptionDescriptor<S>,
    value: &str,
) -> &'s OptionDescriptor<S> {
    let rule = schema
        .inference_rules()
        .iter()
        .find(|rule| rule.matcher.matches(host, &*state, value));

    match rule {
        Some(rule) => {
            if let Some(effect) = rule.effect {
                effect.set(state, true);
            }
            schema.descriptor(rule.target)
        }
        None => {
            if let Some(effect) = schema.fallback_effect() {
                effect.set(state, true);
            }
            slot
        }
    }
}

fn has_suffix(value: &str, suffix: &str) -> bool {
    let (v, s) = (value.as_bytes(), suffix.as_bytes());
    v.len() >= s.len() && v[v.len() - s.len()..].eq_ignore_ascii_case(s)
}
