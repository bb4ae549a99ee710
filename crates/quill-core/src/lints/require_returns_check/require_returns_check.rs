use crate::ast::{FunctionNode, SourceLocation};
use crate::diagnostic::*;
use crate::jsdoc::TagAccessor;
use crate::mode::Mode;
use crate::toml::RequireReturnsCheckTomlOptions;
use crate::utils_ast::{is_async, is_constructor, is_generator, produces_return_value};

/// Options of `require_returns_check`, with the defaults of the active mode
/// already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireReturnsCheckOptions {
    pub exempt_async: bool,
    pub exempt_generators: bool,
    pub report_missing_return_for_undefined_types: bool,
}

impl RequireReturnsCheckOptions {
    pub fn resolve(options: Option<&RequireReturnsCheckTomlOptions>, mode: Mode) -> Self {
        let options = options.copied().unwrap_or_default();
        Self {
            exempt_async: options.exempt_async.unwrap_or(true),
            exempt_generators: options
                .exempt_generators
                .unwrap_or_else(|| mode.policy().default_exempt_generators()),
            report_missing_return_for_undefined_types: options
                .report_missing_return_for_undefined_types
                .unwrap_or(false),
        }
    }
}

impl Default for RequireReturnsCheckOptions {
    fn default() -> Self {
        Self::resolve(None, Mode::default())
    }
}

pub enum RequireReturnsCheck {
    MultipleDeclarations { tag_name: String },
    ContradictsNever { tag_name: String },
    MissingReturn { tag_name: String },
}

/// ## What it does
///
/// Checks that the `@returns` tag of a function agrees with what the
/// function actually returns:
///
/// - `@returns` must not be given more than once;
/// - a function documented as `@returns {never}` must not return a value;
/// - a function documented with a return type must return a value.
///
/// Declarations that are not meant to have an implementation are skipped:
/// functions tagged `@abstract`, `@virtual`, `@class`, `@constructor` or
/// `@interface` (and `@record` in `closure` mode), constructors, and members
/// of a class tagged `@interface` (or `@record` in `closure` mode). By
/// default, `async` functions are skipped too.
///
/// The tag name follows the mode and the tag name preferences, e.g. the
/// rule checks `@return` in `closure` mode.
///
/// ## Why is this bad?
///
/// Documentation that promises a value the function never produces (or the
/// opposite) misleads both readers and the tools that consume the types.
///
/// ## Example
///
/// ```js
/// /**
///  * @returns {string} The name.
///  */
/// function setName(name) {
///   this.name = name;
/// }
/// ```
///
/// Use instead:
/// ```js
/// /**
///  * @returns {string} The name.
///  */
/// function setName(name) {
///   this.name = name;
///   return name;
/// }
/// ```
///
/// ## Options
///
/// - `exempt-async` (default `true`): do not check `async` functions. When
///   `false`, returning any promise counts as returning a value.
/// - `exempt-generators` (default `true` in `typescript` mode, `false`
///   otherwise): do not require a return value from generators.
/// - `report-missing-return-for-undefined-types` (default `false`): also
///   require a return value when the tag has no type, or a type of
///   `undefined` or `void`.
impl Violation for RequireReturnsCheck {
    fn name(&self) -> String {
        "require_returns_check".to_string()
    }
    fn body(&self) -> String {
        match self {
            Self::MultipleDeclarations { tag_name } => {
                format!("Found more than one @{tag_name} declaration.")
            }
            Self::ContradictsNever { tag_name } => format!(
                "JSDoc @{tag_name} declaration set with \"never\" but return expression is present in function."
            ),
            Self::MissingReturn { tag_name } => format!(
                "JSDoc @{tag_name} declaration present but return expression not available in function."
            ),
        }
    }
}

pub fn require_returns_check(
    function: &FunctionNode,
    tags: &TagAccessor,
    options: &RequireReturnsCheckOptions,
    range: SourceLocation,
) -> Option<Diagnostic> {
    if is_exempt(function, tags) {
        return None;
    }

    if options.exempt_async && is_async(function) {
        return None;
    }

    let Some(tag_name) = tags.preferred_tag_name("returns") else {
        tracing::debug!("The `returns` tag family is disabled, skipping declaration");
        return None;
    };

    let returns = tags.get_tags(&tag_name);
    let tag = match returns.as_slice() {
        [] => return None,
        [tag] => *tag,
        _ => {
            return Some(Diagnostic::new(
                RequireReturnsCheck::MultipleDeclarations { tag_name },
                range,
            ));
        }
    };

    let returns_never = tag.type_expression.trim() == "never";

    if returns_never && produces_return_value(function, false) {
        return Some(Diagnostic::new(
            RequireReturnsCheck::ContradictsNever { tag_name },
            range,
        ));
    }

    // The generator exemption only applies here, after the `never` check.
    if !returns_never
        && (options.report_missing_return_for_undefined_types || tag.has_defined_type())
        && !produces_return_value(function, options.exempt_async)
        && !(options.exempt_generators && is_generator(function))
    {
        return Some(Diagnostic::new(
            RequireReturnsCheck::MissingReturn { tag_name },
            range,
        ));
    }

    None
}

/// Declarations that document an interface rather than an implementation.
fn is_exempt(function: &FunctionNode, tags: &TagAccessor) -> bool {
    let policy = tags.mode().policy();

    tags.has_any_tag(policy.voiding_tag_names())
        || is_constructor(function)
        || policy.is_interface_like(tags)
}
