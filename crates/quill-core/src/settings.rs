//
// Adapted from Ark
// https://github.com/posit-dev/air/blob/main/crates/workspace/src/settings.rs
//
// MIT License - Posit PBC

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::mode::Mode;
use crate::toml::RequireReturnsCheckTomlOptions;

/// Resolved configuration settings used within quill
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub linter: LinterSettings,
}

#[derive(Debug, Default, Clone)]
pub struct LinterSettings {
    pub select: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub default_exclude: Option<bool>,
    pub mode: Option<Mode>,
    pub tag_name_preference: Option<BTreeMap<String, TagPreference>>,
    pub ignore_private: Option<bool>,
    pub ignore_internal: Option<bool>,
    pub require_returns_check: Option<RequireReturnsCheckTomlOptions>,
}

/// How a project wants a tag family to be written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTagPreference")]
pub enum TagPreference {
    /// `returns = "return"`
    Alias(String),
    /// `returns = false`: the tag family must not be used.
    Disabled,
    /// `returns = { replacement = "return", message = "..." }`
    Replacement {
        replacement: Option<String>,
        message: Option<String>,
    },
}

impl TagPreference {
    /// The tag name to use instead, `None` when the family is disabled.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Self::Alias(name) => Some(name),
            Self::Disabled => None,
            Self::Replacement { replacement, .. } => replacement.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTagPreference {
    Name(String),
    Flag(bool),
    Object {
        #[serde(default)]
        replacement: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl TryFrom<RawTagPreference> for TagPreference {
    type Error = String;

    fn try_from(raw: RawTagPreference) -> Result<Self, Self::Error> {
        match raw {
            RawTagPreference::Name(name) => Ok(Self::Alias(name)),
            RawTagPreference::Flag(false) => Ok(Self::Disabled),
            RawTagPreference::Flag(true) => Err(
                "a tag preference must be a tag name, `false`, or a table with `replacement` and/or `message`"
                    .to_string(),
            ),
            RawTagPreference::Object { replacement, message } => {
                Ok(Self::Replacement { replacement, message })
            }
        }
    }
}

/// Documentation settings shared by every declaration of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocSettings {
    pub mode: Mode,
    /// Keyed by canonical tag name, optionally prefixed with `tag `.
    pub tag_name_preference: BTreeMap<String, TagPreference>,
    /// Skip declarations documented as `@private` (or `@access private`).
    pub ignore_private: bool,
    /// Skip declarations documented as `@internal`.
    pub ignore_internal: bool,
}

impl DocSettings {
    pub fn from_linter_settings(linter: &LinterSettings, mode: Mode) -> Self {
        Self {
            mode,
            tag_name_preference: linter.tag_name_preference.clone().unwrap_or_default(),
            ignore_private: linter.ignore_private.unwrap_or(false),
            ignore_internal: linter.ignore_internal.unwrap_or(false),
        }
    }
}
