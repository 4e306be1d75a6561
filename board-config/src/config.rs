//! Engine configuration and default locations

/// Default settings file, searched through the host like any other name
pub const SETTINGS_FILE: &str = "~/.xboardrc";

/// Default limit on nested `@file` and settings-file parsing
pub const MAX_INDIRECTION_DEPTH: usize = 32;

/// Switch and separator conventions of the settings text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `-name value`
    Unix,
    /// `/name=value`, `-name` still accepted
    Windows,
}

impl Dialect {
    /// Dialect of the platform the engine was built for
    pub fn native() -> Self {
        if cfg!(windows) {
            Dialect::Windows
        } else {
            Dialect::Unix
        }
    }

    /// Marker written in front of option names
    pub fn marker(&self) -> char {
        match self {
            Dialect::Unix => '-',
            Dialect::Windows => '/',
        }
    }

    /// Text written between an option name and its value
    pub fn separator(&self) -> &'static str {
        match self {
            Dialect::Unix => " ",
            Dialect::Windows => "=",
        }
    }

    /// Whether `c` starts an option token
    pub fn is_switch(&self, c: char) -> bool {
        c == '-' || c == self.marker()
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::native()
    }
}

/// Settings of the engine itself, as opposed to the options it manages
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Name of the default settings file
    pub settings_file: String,
    pub dialect: Dialect,
    pub max_depth: usize,
    /// Product line written into the settings-file header
    pub package: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings_file: SETTINGS_FILE.to_string(),
            dialect: Dialect::native(),
            max_depth: MAX_INDIRECTION_DEPTH,
            package: format!("board {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EngineConfig {
    pub fn with_settings_file(mut self, name: impl Into<String>) -> Self {
        self.settings_file = name.into();
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_dialect() {
        let d = Dialect::Unix;
        assert_eq!(d.marker(), '-');
        assert_eq!(d.separator(), " ");
        assert!(d.is_switch('-'));
        assert!(!d.is_switch('/'));
    }

    #[test]
    fn test_windows_dialect_accepts_both() {
        let d = Dialect::Windows;
        assert!(d.is_switch('/'));
        assert!(d.is_switch('-'));
        assert_eq!(d.separator(), "=");
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.settings_file, "~/.xboardrc");
        assert_eq!(config.max_depth, 32);
    }
}
