//! RC file entries: alias and export lines

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    static ref ALIAS_NAME: Regex = Regex::new(r#"^[^\s='"/]+$"#).unwrap();
    static ref EXPORT_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Entry type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Alias,
    EnvVar,
}

impl EntryType {
    /// Keyword that starts every line of this type
    pub fn keyword(&self) -> &'static str {
        match self {
            EntryType::Alias => "alias",
            EntryType::EnvVar => "export",
        }
    }

    /// Prefix used when listing lines of this type, e.g. `"alias "`
    pub fn list_prefix(&self) -> String {
        format!("{} ", self.keyword())
    }

    /// Prefix identifying the line that defines `name`, e.g. `"alias ll="`
    pub fn key_prefix(&self, name: &str) -> String {
        format!("{} {}=", self.keyword(), name)
    }

    /// Reject names that would produce a line the key prefix cannot match
    pub fn validate_name(&self, name: &str) -> Result<()> {
        let pattern: &Regex = match self {
            EntryType::Alias => &*ALIAS_NAME,
            EntryType::EnvVar => &*EXPORT_NAME,
        };
        if pattern.is_match(name) {
            Ok(())
        } else {
            Err(Error::InvalidName {
                kind: self.keyword(),
                name: name.to_string(),
            })
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::Alias => write!(f, "Alias"),
            EntryType::EnvVar => write!(f, "Export"),
        }
    }
}

/// A single RC file entry
///
/// `name` is the identity key: the alias name or the exported variable.
/// `value` is the alias command or the variable's value, unquoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub entry_type: EntryType,
    pub name: String,
    pub value: String,
}

impl Entry {
    pub fn new(entry_type: EntryType, name: String, value: String) -> Self {
        Self {
            entry_type,
            name,
            value,
        }
    }

    /// Build an alias entry after validating its name
    pub fn alias(name: &str, command: &str) -> Result<Self> {
        EntryType::Alias.validate_name(name)?;
        Ok(Self::new(EntryType::Alias, name.into(), command.into()))
    }

    /// Build an export entry after validating its variable name
    pub fn export(var: &str, value: &str) -> Result<Self> {
        EntryType::EnvVar.validate_name(var)?;
        Ok(Self::new(EntryType::EnvVar, var.into(), value.into()))
    }

    /// The line as written to the RC file, without the trailing newline
    pub fn to_line(&self) -> String {
        match self.entry_type {
            EntryType::Alias => format!("alias {}='{}'", self.name, self.value),
            EntryType::EnvVar if self.value.contains(' ') => {
                format!("export {}=\"{}\"", self.name, self.value)
            }
            EntryType::EnvVar => format!("export {}={}", self.name, self.value),
        }
    }

    pub fn key_prefix(&self) -> String {
        self.entry_type.key_prefix(&self.name)
    }
}
