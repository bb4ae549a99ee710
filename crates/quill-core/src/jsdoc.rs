use serde::{Deserialize, Serialize};

use crate::ast::SourceLocation;
use crate::mode::Mode;
use crate::settings::DocSettings;

/// A documentation block, already split into tags by the upstream comment
/// parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// One `@tag {type} name description` entry of a documentation block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without the leading `@`.
    pub tag: String,
    /// Content of the braces, empty when no type was given.
    #[serde(default, rename = "type")]
    pub type_expression: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

impl Tag {
    pub fn new(tag: &str, type_expression: &str) -> Self {
        Self {
            tag: tag.to_string(),
            type_expression: type_expression.to_string(),
            ..Default::default()
        }
    }

    /// Whether the tag declares a type other than `undefined` or `void`.
    pub fn has_defined_type(&self) -> bool {
        !matches!(self.type_expression.trim(), "" | "undefined" | "void")
    }
}

impl DocComment {
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self { tags, ..Default::default() }
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.tag == name)
    }
}

/// Read-only queries on the doc comment of one declaration, resolved against
/// the active documentation settings.
#[derive(Debug, Clone, Copy)]
pub struct TagAccessor<'a> {
    jsdoc: &'a DocComment,
    class_jsdoc: Option<&'a DocComment>,
    settings: &'a DocSettings,
}

impl<'a> TagAccessor<'a> {
    pub fn new(
        jsdoc: &'a DocComment,
        class_jsdoc: Option<&'a DocComment>,
        settings: &'a DocSettings,
    ) -> Self {
        Self { jsdoc, class_jsdoc, settings }
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn has_any_tag(&self, names: &[&str]) -> bool {
        self.jsdoc
            .tags
            .iter()
            .any(|tag| names.contains(&tag.tag.as_str()))
    }

    /// All tags named exactly `name`, in source order.
    pub fn get_tags(&self, name: &str) -> Vec<&'a Tag> {
        self.jsdoc.tags.iter().filter(|tag| tag.tag == name).collect()
    }

    /// Whether the doc comment of the enclosing class carries `name`. False
    /// outside of a class.
    pub fn class_has_tag(&self, name: &str) -> bool {
        self.class_jsdoc.is_some_and(|doc| doc.has_tag(name))
    }

    /// Name under which the `canonical` tag family is written in this project.
    ///
    /// Project preferences win over the aliases of the active mode. Returns
    /// `None` when the project disabled the tag family altogether.
    pub fn preferred_tag_name(&self, canonical: &str) -> Option<String> {
        let preferences = &self.settings.tag_name_preference;

        // The name is itself somebody's preferred spelling: keep it.
        if preferences
            .values()
            .any(|preference| preference.replacement() == Some(canonical))
        {
            return Some(canonical.to_string());
        }

        // Keys may carry a `tag ` prefix.
        if let Some(preference) = preferences
            .iter()
            .find(|(key, _)| key.strip_prefix("tag ").unwrap_or(key) == canonical)
            .map(|(_, preference)| preference)
        {
            return preference.replacement().map(str::to_string);
        }

        let name = self
            .settings
            .mode
            .policy()
            .preferred_alias_target(canonical)
            .unwrap_or(canonical);
        Some(name.to_string())
    }
}
