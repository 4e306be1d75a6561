//! Option descriptors and the immutable option schema
//!
//! Every descriptor binds an option name to an [`OptionKind`], which carries
//! the typed storage the option writes to. Storage is reached through a
//! [`Lens`], a pair of plain accessor functions into the host's state, so a
//! descriptor can only ever target a slot of the type its tag implies.

use crate::inference::{InferenceRule, Matcher};
use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::fmt;

/// Typed reference to one field of the state `S`
pub struct Lens<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> Lens<S, T> {
    pub const fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'a>(&self, state: &'a S) -> &'a T {
        (self.get)(state)
    }

    pub fn get_mut<'a>(&self, state: &'a mut S) -> &'a mut T {
        (self.get_mut)(state)
    }

    pub fn set(&self, state: &mut S, value: T) {
        *(self.get_mut)(state) = value;
    }
}

impl<S, T> Clone for Lens<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Lens<S, T> {}

impl<S, T> fmt::Debug for Lens<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lens")
    }
}

/// Build a [`Lens`] for a (possibly nested) field of a state type
///
/// ```
/// # use board_config::lens;
/// struct Window { x: i32 }
/// struct State { main: Window }
///
/// let x = lens!(State, main.x);
/// let mut state = State { main: Window { x: 1 } };
/// x.set(&mut state, 7);
/// assert_eq!(*x.get(&state), 7);
/// ```
#[macro_export]
macro_rules! lens {
    ($state:ty, $($field:ident).+) => {
        $crate::schema::Lens::<$state, _>::new(|s| &s.$($field).+, |s| &mut s.$($field).+)
    };
}

/// Type tag of an option together with the storage it writes to
pub enum OptionKind<S> {
    /// Free text, `~~` expands to the data directory
    String(Lens<S, String>),
    /// Path; backslashes are never escapes inside quotes
    Filename(Lens<S, String>),
    Int(Lens<S, i32>),
    /// Integer stored relative to `origin`
    X {
        slot: Lens<S, i32>,
        origin: Lens<S, i32>,
    },
    /// Integer stored relative to `origin`
    Y {
        slot: Lens<S, i32>,
        origin: Lens<S, i32>,
    },
    /// Integer that re-clamps window placement once set
    Z(Lens<S, i32>),
    Float(Lens<S, f32>),
    /// `true`/`false` valued flag
    Boolean(Lens<S, bool>),
    /// Value-less switch setting its flag
    True(Lens<S, bool>),
    /// Value-less switch clearing its flag
    False(Lens<S, bool>),
    /// Value-less switch setting a three-state level to 2
    Two(Lens<S, u8>),
    Color(usize),
    Attribs(usize),
    Font(usize),
    BoardSize,
    CommSettings,
    /// Names a file that is parsed in place; the resolved path goes to the
    /// fallback storage when there is one
    SettingsFilename(Option<Lens<S, String>>),
    /// Like `SettingsFilename`, unless a non-default settings file was read
    BackupSettingsFile(Lens<S, String>),
    /// Newline-joined accumulator
    Install(Lens<S, String>),
    /// Line appended to the default settings file
    Master,
    /// Table sentinel, any value is rejected
    None,
}

impl<S> OptionKind<S> {
    /// Switches that never take a value token
    pub fn is_valueless(&self) -> bool {
        matches!(
            self,
            OptionKind::True(_) | OptionKind::False(_) | OptionKind::Two(_)
        )
    }

    /// Whether a backslash inside quotes is kept literally
    pub fn is_path(&self) -> bool {
        matches!(
            self,
            OptionKind::Filename(_) | OptionKind::SettingsFilename(_)
        )
    }

    /// Whether the value is interpreted by a host hook
    pub fn is_delegated(&self) -> bool {
        matches!(
            self,
            OptionKind::Color(_)
                | OptionKind::Attribs(_)
                | OptionKind::Font(_)
                | OptionKind::BoardSize
                | OptionKind::CommSettings
        )
    }

    pub fn tag(&self) -> &'static str {
        match self {
            OptionKind::String(_) => "string",
            OptionKind::Filename(_) => "filename",
            OptionKind::Int(_) => "int",
            OptionKind::X { .. } => "x",
            OptionKind::Y { .. } => "y",
            OptionKind::Z(_) => "z",
            OptionKind::Float(_) => "float",
            OptionKind::Boolean(_) => "boolean",
            OptionKind::True(_) => "true",
            OptionKind::False(_) => "false",
            OptionKind::Two(_) => "two",
            OptionKind::Color(_) => "color",
            OptionKind::Attribs(_) => "attribs",
            OptionKind::Font(_) => "font",
            OptionKind::BoardSize => "board-size",
            OptionKind::CommSettings => "comm-settings",
            OptionKind::SettingsFilename(_) => "settings-filename",
            OptionKind::BackupSettingsFile(_) => "backup-settings-file",
            OptionKind::Install(_) => "install",
            OptionKind::Master => "master",
            OptionKind::None => "none",
        }
    }

    fn accepts(&self, default: &DefaultValue) -> bool {
        match (self, default) {
            (
                OptionKind::String(_)
                | OptionKind::Filename(_)
                | OptionKind::Install(_)
                | OptionKind::SettingsFilename(Some(_))
                | OptionKind::BackupSettingsFile(_),
                DefaultValue::Text(_),
            ) => true,
            (
                OptionKind::Int(_)
                | OptionKind::X { .. }
                | OptionKind::Y { .. }
                | OptionKind::Z(_)
                | OptionKind::Two(_),
                DefaultValue::Int(_),
            ) => true,
            (OptionKind::Float(_), DefaultValue::Float(_) | DefaultValue::Int(_)) => true,
            (
                OptionKind::Boolean(_) | OptionKind::True(_) | OptionKind::False(_),
                DefaultValue::Bool(_),
            ) => true,
            (kind, DefaultValue::Text(_)) => kind.is_delegated(),
            _ => false,
        }
    }
}

impl<S> fmt::Debug for OptionKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Structured default of a descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    Text(&'static str),
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        DefaultValue::Int(v)
    }
}

impl From<f32> for DefaultValue {
    fn from(v: f32) -> Self {
        DefaultValue::Float(v)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        DefaultValue::Bool(v)
    }
}

impl From<&'static str> for DefaultValue {
    fn from(v: &'static str) -> Self {
        DefaultValue::Text(v)
    }
}

/// One entry of the option table
pub struct OptionDescriptor<S> {
    pub name: &'static str,
    pub kind: OptionKind<S>,
    /// Written by the serializer
    pub persist: bool,
    /// `None` is the "no default" sentinel
    pub default: Option<DefaultValue>,
    /// Alternative spelling of the preceding primary option
    pub alias: bool,
    /// Left out of the usage listing
    pub hidden: bool,
}

impl<S> OptionDescriptor<S> {
    pub fn new(name: &'static str, kind: OptionKind<S>) -> Self {
        Self {
            name,
            kind,
            persist: false,
            default: None,
            alias: false,
            hidden: false,
        }
    }

    /// Shorthand for a non-persisted alias without default
    pub fn alias(name: &'static str, kind: OptionKind<S>) -> Self {
        Self {
            alias: true,
            ..Self::new(name, kind)
        }
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl<S> fmt::Debug for OptionDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("persist", &self.persist)
            .field("default", &self.default)
            .finish()
    }
}

/// Immutable option table with name and positional lookup
pub struct Schema<S> {
    descriptors: Vec<OptionDescriptor<S>>,
    by_name: HashMap<&'static str, usize>,
    positional: Vec<usize>,
    rules: Vec<InferenceRule<S>>,
    fallback_effect: Option<Lens<S, bool>>,
    indirection: OptionDescriptor<S>,
    overflow: OptionDescriptor<S>,
}

impl<S> Schema<S> {
    pub fn builder() -> SchemaBuilder<S> {
        SchemaBuilder::new()
    }

    /// Look up a descriptor by exact name; the first table entry wins
    pub fn get(&self, name: &str) -> Option<&OptionDescriptor<S>> {
        self.by_name.get(name).map(|&i| &self.descriptors[i])
    }

    pub fn descriptors(&self) -> &[OptionDescriptor<S>] {
        &self.descriptors
    }

    pub fn descriptor(&self, index: usize) -> &OptionDescriptor<S> {
        &self.descriptors[index]
    }

    /// Descriptor receiving the `n`th bare token
    ///
    /// Past the last slot this is a `None`-kind sentinel that rejects the
    /// token.
    pub fn positional_slot(&self, n: usize) -> &OptionDescriptor<S> {
        match self.positional.get(n) {
            Some(&i) => &self.descriptors[i],
            None => &self.overflow,
        }
    }

    pub fn inference_rules(&self) -> &[InferenceRule<S>] {
        &self.rules
    }

    pub fn fallback_effect(&self) -> Option<Lens<S, bool>> {
        self.fallback_effect
    }

    /// Pseudo-descriptor used for `@file` tokens
    pub fn indirection(&self) -> &OptionDescriptor<S> {
        &self.indirection
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<S> fmt::Debug for Schema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("options", &self.descriptors.len())
            .field("positional", &self.positional)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Collects descriptors and positional rules, then freezes them
pub struct SchemaBuilder<S> {
    descriptors: Vec<OptionDescriptor<S>>,
    positional: Vec<&'static str>,
    rules: Vec<(Matcher, &'static str, Option<Lens<S, bool>>)>,
    fallback_effect: Option<Lens<S, bool>>,
}

impl<S> Default for SchemaBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SchemaBuilder<S> {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            positional: Vec::new(),
            rules: Vec::new(),
            fallback_effect: None,
        }
    }

    pub fn option(mut self, descriptor: OptionDescriptor<S>) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Reserve the named descriptor for the next bare token
    pub fn positional(mut self, name: &'static str) -> Self {
        self.positional.push(name);
        self
    }

    /// Redirect a bare token to `target` when `matcher` accepts it
    pub fn infer(
        mut self,
        matcher: Matcher,
        target: &'static str,
        effect: Option<Lens<S, bool>>,
    ) -> Self {
        self.rules.push((matcher, target, effect));
        self
    }

    /// Flag raised when no inference rule matched a bare token
    pub fn fallback_effect(mut self, effect: Lens<S, bool>) -> Self {
        self.fallback_effect = Some(effect);
        self
    }

    pub fn build(self) -> Result<Schema<S>> {
        let mut by_name = HashMap::with_capacity(self.descriptors.len());
        for (i, d) in self.descriptors.iter().enumerate() {
            if let Some(default) = &d.default {
                if !d.kind.accepts(default) {
                    return Err(ConfigError::Schema(format!(
                        "default {:?} does not fit {} option {}",
                        default,
                        d.kind.tag(),
                        d.name
                    )));
                }
            }
            by_name.entry(d.name).or_insert(i);
        }

        let resolve = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| ConfigError::Schema(format!("unknown option {}", name)))
        };

        let positional = self
            .positional
            .iter()
            .map(|name| resolve(*name))
            .collect::<Result<Vec<_>>>()?;

        let rules = self
            .rules
            .into_iter()
            .map(|(matcher, target, effect)| {
                Ok(InferenceRule {
                    matcher,
                    target: resolve(target)?,
                    effect,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Schema {
            descriptors: self.descriptors,
            by_name,
            positional,
            rules,
            fallback_effect: self.fallback_effect,
            indirection: OptionDescriptor::new("", OptionKind::SettingsFilename(None)),
            overflow: OptionDescriptor::new("", OptionKind::None),
        })
    }
}
