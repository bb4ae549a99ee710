use crate::check::Checker;
use crate::declaration::Declaration;
use crate::jsdoc::{DocComment, TagAccessor};
use crate::rule_set::Rule;

use crate::lints::require_returns_check::require_returns_check::require_returns_check;

/// Run the enabled rules on one documented declaration.
///
/// Declarations without a doc comment are never checked. Private and
/// internal declarations are skipped when the settings ask for it.
pub fn declaration(declaration: &Declaration, checker: &mut Checker) -> anyhow::Result<()> {
    let Some(jsdoc) = &declaration.jsdoc else {
        return Ok(());
    };

    if checker.settings.ignore_private && is_private(jsdoc) {
        tracing::debug!("Skipping private declaration");
        return Ok(());
    }
    if checker.settings.ignore_internal && jsdoc.has_tag("internal") {
        tracing::debug!("Skipping internal declaration");
        return Ok(());
    }

    if checker.is_rule_enabled(Rule::RequireReturnsCheck) {
        let tags = TagAccessor::new(jsdoc, declaration.class_jsdoc.as_ref(), &checker.settings);
        let diagnostic = require_returns_check(
            &declaration.function,
            &tags,
            &checker.require_returns_check,
            declaration.report_location(),
        );
        checker.report_diagnostic(diagnostic);
    }

    Ok(())
}

/// `@private`, or `@access private`.
fn is_private(jsdoc: &DocComment) -> bool {
    jsdoc.tags.iter().any(|tag| {
        tag.tag == "private"
            || (tag.tag == "access"
                && (tag.name.contains("private") || tag.description.contains("private")))
    })
}
