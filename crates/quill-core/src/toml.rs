//
// Adapted from Ark
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml.rs
// and
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml_options.rs
//
// MIT License - Posit PBC

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::mode::Mode;
use crate::settings::LinterSettings;
use crate::settings::Settings;
use crate::settings::TagPreference;

#[derive(Debug)]
pub enum ParseTomlError {
    Read(PathBuf, io::Error),
    Deserialize(PathBuf, toml::de::Error),
}

impl std::error::Error for ParseTomlError {}

impl Display for ParseTomlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // It's nicer if we don't make these paths relative, so we can quickly
            // jump to the TOML file to see what is wrong
            Self::Read(path, err) => {
                write!(f, "Failed to read {path}:\n{err}", path = path.display())
            }
            Self::Deserialize(path, err) => {
                write!(f, "Failed to parse {path}:\n{err}", path = path.display())
            }
        }
    }
}

pub fn parse_quill_toml(path: &Path) -> Result<TomlOptions, ParseTomlError> {
    let toml = fs::read_to_string(path).map_err(|err| ParseTomlError::Read(path.to_path_buf(), err))?;
    toml::from_str(&toml).map_err(|err| ParseTomlError::Deserialize(path.to_path_buf(), err))
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlOptions {
    #[serde(flatten)]
    pub global: GlobalTomlOptions,
    pub lint: Option<LinterTomlOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GlobalTomlOptions {}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LinterTomlOptions {
    /// # Rules to select
    ///
    /// If this is empty, then all rules that are provided by `quill` are used.
    /// Rule groups such as `"CORR"` are expanded to the rules they contain.
    pub select: Option<Vec<String>>,

    /// # Rules to ignore
    ///
    /// If this is empty, then no rules are excluded. This field has higher
    /// importance than `select`, so if a rule name appears by mistake in both
    /// `select` and `ignore`, it is ignored.
    pub ignore: Option<Vec<String>>,

    /// # Patterns to exclude from checking
    ///
    /// Patterns follow the `.gitignore` syntax and are resolved relative to
    /// the directory containing `quill.toml`, e.g. `vendor/` or
    /// `generated/*.quill.json`.
    pub exclude: Option<Vec<String>>,

    /// # Whether or not to use default exclude patterns
    ///
    /// quill automatically excludes `.git/` and `node_modules/`. Set this to
    /// `false` to check them as well.
    pub default_exclude: Option<bool>,

    /// # Documentation dialect
    ///
    /// One of `"jsdoc"` (default), `"typescript"`, `"closure"` or
    /// `"permissive"`. The dialect decides which tag spellings are expected
    /// (e.g. `@return` under Closure) and some rule defaults.
    pub mode: Option<Mode>,

    /// # Preferred tag names
    ///
    /// Maps a canonical tag name to the spelling used in this project, e.g.
    /// `returns = "return"`. Use `false` to forbid a tag family entirely, in
    /// which case the checks on that family are skipped.
    pub tag_name_preference: Option<BTreeMap<String, TagPreference>>,

    /// # Skip private declarations
    ///
    /// Do not check declarations documented with `@private` or
    /// `@access private`.
    pub ignore_private: Option<bool>,

    /// # Skip internal declarations
    ///
    /// Do not check declarations documented with `@internal`.
    pub ignore_internal: Option<bool>,

    /// # Options of `require_returns_check`
    pub require_returns_check: Option<RequireReturnsCheckTomlOptions>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RequireReturnsCheckTomlOptions {
    /// Do not check `async` functions. Defaults to `true`.
    pub exempt_async: Option<bool>,
    /// Do not check generator functions. Defaults to `true` in `typescript`
    /// mode and `false` otherwise.
    pub exempt_generators: Option<bool>,
    /// Also require a return value when the tag has no type, or a type of
    /// `undefined` or `void`. Defaults to `false`.
    pub report_missing_return_for_undefined_types: Option<bool>,
}

/// Return the path to the `quill.toml` or `.quill.toml` file in a given directory.
pub fn find_quill_toml_in_directory<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    // Check for `quill.toml` first, as we prioritize the "visible" one.
    let toml = path.as_ref().join("quill.toml");
    if toml.is_file() {
        return Some(toml);
    }

    // Now check for `.quill.toml` as well
    let toml = path.as_ref().join(".quill.toml");
    if toml.is_file() {
        return Some(toml);
    }

    // Didn't find a configuration file
    None
}

impl TomlOptions {
    pub fn into_settings(self, _root: &Path) -> anyhow::Result<Settings> {
        let linter = self.lint.unwrap_or_default();

        let linter = LinterSettings {
            select: linter.select,
            ignore: linter.ignore,
            exclude: linter.exclude,
            default_exclude: linter.default_exclude,
            mode: linter.mode,
            tag_name_preference: linter.tag_name_preference,
            ignore_private: linter.ignore_private,
            ignore_internal: linter.ignore_internal,
            require_returns_check: linter.require_returns_check,
        };

        Ok(Settings { linter })
    }
}
