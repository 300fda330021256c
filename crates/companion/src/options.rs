#![forbid(unsafe_code)]

//! Binding options and the argument normalizer.
//!
//! A binding accepts zero or one argument:
//!
//! | Argument              | Companion key        | Raw emission |
//! |-----------------------|----------------------|--------------|
//! | `()`                  | `<property>$`        | no           |
//! | `"custom$"`           | `custom$`            | no           |
//! | `BindOptions { .. }`  | `key` or `<property>$` | as given   |

/// Suffix appended to a property name to derive its default companion key.
pub const COMPANION_SUFFIX: char = '$';

/// Normalized binding options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Custom companion key. `None` derives `<property>$`.
    pub key: Option<String>,
    /// For layered bindings: emit the raw assigned value instead of the value
    /// read back through the wrapped getter.
    pub emit_raw_setter_value: bool,
}

impl BindOptions {
    /// Options with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `key` as the companion key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set whether layered bindings emit the raw assigned value.
    #[must_use]
    pub fn emit_raw_setter_value(mut self, raw: bool) -> Self {
        self.emit_raw_setter_value = raw;
        self
    }

    /// Companion key for `property` under these options.
    #[must_use]
    pub fn companion_key(&self, property: &str) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => {
                let mut key = String::with_capacity(property.len() + 1);
                key.push_str(property);
                key.push(COMPANION_SUFFIX);
                key
            }
        }
    }
}

/// The single optional argument of a binding declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BindArg {
    /// No argument.
    #[default]
    Default,
    /// Bare string: shorthand for the companion key.
    Key(String),
    /// Structured options.
    Options(BindOptions),
}

impl From<()> for BindArg {
    fn from((): ()) -> Self {
        Self::Default
    }
}

impl From<&str> for BindArg {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for BindArg {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<BindOptions> for BindArg {
    fn from(options: BindOptions) -> Self {
        Self::Options(options)
    }
}

/// Collapse any binding argument into [`BindOptions`].
#[must_use]
pub fn normalize(arg: impl Into<BindArg>) -> BindOptions {
    match arg.into() {
        BindArg::Default => BindOptions::default(),
        BindArg::Key(key) => BindOptions::new().with_key(key),
        BindArg::Options(options) => options,
    }
}
