use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::jsdoc::TagAccessor;

/// Documentation dialect in effect for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Jsdoc,
    Typescript,
    /// Google Closure Compiler annotations.
    Closure,
    Permissive,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jsdoc => "jsdoc",
            Self::Typescript => "typescript",
            Self::Closure => "closure",
            Self::Permissive => "permissive",
        }
    }

    pub const ALL: &'static [Mode] = &[Mode::Jsdoc, Mode::Typescript, Mode::Closure, Mode::Permissive];

    /// The rules attached to this dialect.
    pub fn policy(self) -> &'static dyn DialectPolicy {
        match self {
            Self::Jsdoc => &JsdocPolicy,
            Self::Typescript => &TypescriptPolicy,
            Self::Closure => &ClosurePolicy,
            Self::Permissive => &PermissivePolicy,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jsdoc" => Ok(Self::Jsdoc),
            "typescript" => Ok(Self::Typescript),
            "closure" => Ok(Self::Closure),
            "permissive" => Ok(Self::Permissive),
            _ => Err(format!("Unknown mode: {s}")),
        }
    }
}

/// Tags whose presence alone marks a declaration as intentionally incomplete.
const BASE_VOIDING_TAGS: &[&str] = &["abstract", "virtual", "class", "constructor", "interface"];

/// `@record` is Closure's structural interface.
const CLOSURE_VOIDING_TAGS: &[&str] = &[
    "abstract",
    "virtual",
    "class",
    "constructor",
    "interface",
    "record",
];

/// Preferred tag name followed by the names accepted as synonyms.
type TagAliases = &'static [(&'static str, &'static [&'static str])];

const JSDOC_TAG_ALIASES: TagAliases = &[
    ("abstract", &["virtual"]),
    ("augments", &["extends"]),
    ("class", &["constructor"]),
    ("constant", &["const"]),
    ("default", &["defaultvalue"]),
    ("description", &["desc"]),
    ("external", &["host"]),
    ("file", &["fileoverview", "overview"]),
    ("fires", &["emits"]),
    ("function", &["func", "method"]),
    ("member", &["var"]),
    ("param", &["arg", "argument"]),
    ("property", &["prop"]),
    ("returns", &["return"]),
    ("throws", &["exception"]),
    ("yields", &["yield"]),
];

// Closure only knows `@return`.
const CLOSURE_TAG_ALIASES: TagAliases = &[
    ("abstract", &["virtual"]),
    ("augments", &["extends"]),
    ("class", &["constructor"]),
    ("constant", &["const"]),
    ("default", &["defaultvalue"]),
    ("description", &["desc"]),
    ("external", &["host"]),
    ("file", &["fileoverview", "overview"]),
    ("fires", &["emits"]),
    ("function", &["func", "method"]),
    ("member", &["var"]),
    ("param", &["arg", "argument"]),
    ("property", &["prop"]),
    ("return", &["returns"]),
    ("throws", &["exception"]),
    ("yields", &["yield"]),
];

/// Dialect-specific exemptions, aliases and defaults.
pub trait DialectPolicy: Sync {
    /// Tags that exempt a declaration from return checks.
    fn voiding_tag_names(&self) -> &'static [&'static str] {
        BASE_VOIDING_TAGS
    }

    /// Class tags that make every member of the class a declaration only.
    fn interface_tag_names(&self) -> &'static [&'static str] {
        &["interface"]
    }

    fn tag_aliases(&self) -> TagAliases {
        JSDOC_TAG_ALIASES
    }

    /// Whether generator functions are exempt from return checks unless the
    /// user says otherwise.
    fn default_exempt_generators(&self) -> bool {
        false
    }

    /// Whether the enclosing class is documented as an interface.
    fn is_interface_like(&self, tags: &TagAccessor) -> bool {
        self.interface_tag_names()
            .iter()
            .any(|name| tags.class_has_tag(name))
    }

    /// The tag `name` is a synonym of, if any.
    fn preferred_alias_target(&self, name: &str) -> Option<&'static str> {
        self.tag_aliases()
            .iter()
            .find(|(_, aliases)| aliases.contains(&name))
            .map(|(preferred, _)| *preferred)
    }
}

pub struct JsdocPolicy;

impl DialectPolicy for JsdocPolicy {}

pub struct TypescriptPolicy;

impl DialectPolicy for TypescriptPolicy {
    // TypeScript types generators with `Generator<...>` rather than with the
    // value of their `return`.
    fn default_exempt_generators(&self) -> bool {
        true
    }
}

pub struct ClosurePolicy;

impl DialectPolicy for ClosurePolicy {
    fn voiding_tag_names(&self) -> &'static [&'static str] {
        CLOSURE_VOIDING_TAGS
    }

    fn interface_tag_names(&self) -> &'static [&'static str] {
        &["interface", "record"]
    }

    fn tag_aliases(&self) -> TagAliases {
        CLOSURE_TAG_ALIASES
    }
}

/// Accepts Closure spellings but none of its structural typing.
pub struct PermissivePolicy;

impl DialectPolicy for PermissivePolicy {
    fn tag_aliases(&self) -> TagAliases {
        CLOSURE_TAG_ALIASES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsdoc::{DocComment, Tag};
    use crate::settings::DocSettings;

    #[test]
    fn test_voiding_tags() {
        for mode in Mode::ALL {
            let voiding = mode.policy().voiding_tag_names();
            for tag in BASE_VOIDING_TAGS {
                assert!(voiding.contains(tag), "{mode} misses {tag}");
            }
            assert_eq!(voiding.contains(&"record"), *mode == Mode::Closure);
        }
    }

    #[test]
    fn test_interface_like() {
        let interface = DocComment::from_tags(vec![Tag::new("interface", "")]);
        let record = DocComment::from_tags(vec![Tag::new("record", "")]);
        let plain = DocComment::from_tags(vec![Tag::new("description", "")]);

        fn interface_like(mode: Mode, class_doc: Option<&DocComment>) -> bool {
            let member = DocComment::default();
            let settings = DocSettings { mode, ..Default::default() };
            mode.policy()
                .is_interface_like(&TagAccessor::new(&member, class_doc, &settings))
        }

        for mode in Mode::ALL {
            assert!(interface_like(*mode, Some(&interface)));
            assert!(!interface_like(*mode, Some(&plain)));
            assert!(!interface_like(*mode, None));
            assert_eq!(interface_like(*mode, Some(&record)), *mode == Mode::Closure);
        }
    }

    #[test]
    fn test_default_exempt_generators() {
        assert!(!Mode::Jsdoc.policy().default_exempt_generators());
        assert!(Mode::Typescript.policy().default_exempt_generators());
        assert!(!Mode::Closure.policy().default_exempt_generators());
        assert!(!Mode::Permissive.policy().default_exempt_generators());
    }

    #[test]
    fn test_preferred_alias_target() {
        let jsdoc = Mode::Jsdoc.policy();
        assert_eq!(jsdoc.preferred_alias_target("return"), Some("returns"));
        assert_eq!(jsdoc.preferred_alias_target("returns"), None);
        assert_eq!(jsdoc.preferred_alias_target("arg"), Some("param"));

        let closure = Mode::Closure.policy();
        assert_eq!(closure.preferred_alias_target("returns"), Some("return"));
        assert_eq!(closure.preferred_alias_target("return"), None);
    }

    #[test]
    fn test_mode_from_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>(), Ok(*mode));
        }
        assert!("flow".parse::<Mode>().is_err());
    }
}
