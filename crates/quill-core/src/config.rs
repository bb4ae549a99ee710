use crate::{
    fs,
    lints::RequireReturnsCheckOptions,
    mode::Mode,
    resolve::PathResolver,
    rule_set::{ALL_RULES, Category, Rule, RuleSet},
    settings::{DocSettings, LinterSettings, Settings},
};
use anyhow::Result;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Default)]
/// Arguments provided in the CLI.
pub struct ArgsConfig {
    /// Paths to files to lint.
    pub files: Vec<PathBuf>,
    /// Names of rules to use. A single string with commas between rule names.
    pub select: String,
    /// Names of rules to ignore. A single string with commas between rule names.
    pub ignore: String,
    /// Documentation dialect, overriding the one of `quill.toml`.
    pub mode: Option<Mode>,
}

/// Everything needed to check the files governed by one `quill.toml`.
#[derive(Clone, Debug, PartialEq)]
pub struct LintConfig {
    /// Rules to apply, after reconciling the CLI and `quill.toml`.
    pub rules: RuleSet,
    pub settings: DocSettings,
    pub require_returns_check: RequireReturnsCheckOptions,
}

#[derive(Debug)]
pub struct Config {
    /// Paths to files to lint.
    pub paths: Vec<PathBuf>,
    /// One [LintConfig] per discovered `quill.toml`, keyed by its directory.
    /// Files outside of all of them use the fallback.
    pub lint_configs: PathResolver<LintConfig>,
}

impl Config {
    /// The configuration of the closest `quill.toml` above `path`.
    pub fn lint_config(&self, path: &Path) -> &LintConfig {
        self.lint_configs
            .resolve_or_fallback(&fs::normalize_path(path))
    }
}

type RuleSelection = (Option<HashSet<Rule>>, HashSet<Rule>);

pub fn build_config(
    check_config: &ArgsConfig,
    resolver: &PathResolver<Settings>,
    paths: Vec<PathBuf>,
) -> Result<Config> {
    let rules_cli = parse_rules_cli(&check_config.select, &check_config.ignore)?;

    let mut fallback = None;
    let mut scoped = Vec::new();

    for item in resolver.items() {
        let lint_config = build_lint_config(check_config, &rules_cli, Some(item.value()))
            .map_err(|err| {
                anyhow::anyhow!("{err} (in {})", item.path().display())
            })?;

        // A configuration that is not above any checked file comes from the
        // user config directory and applies everywhere.
        if paths.iter().any(|path| path.starts_with(item.path())) {
            scoped.push((item.path(), lint_config));
        } else {
            fallback = Some(lint_config);
        }
    }

    let fallback = match fallback {
        Some(fallback) => fallback,
        None => build_lint_config(check_config, &rules_cli, None)?,
    };

    let mut lint_configs = PathResolver::new(fallback);
    for (path, lint_config) in scoped {
        lint_configs.add(path, lint_config);
    }

    Ok(Config { paths, lint_configs })
}

fn build_lint_config(
    check_config: &ArgsConfig,
    rules_cli: &RuleSelection,
    toml_settings: Option<&Settings>,
) -> Result<LintConfig> {
    let rules_toml = parse_rules_toml(toml_settings)?;
    let rules = reconcile_rules(rules_cli.clone(), rules_toml);

    let default_linter = LinterSettings::default();
    let linter = toml_settings.map_or(&default_linter, |settings| &settings.linter);

    // The CLI wins over `quill.toml`.
    let mode = check_config.mode.or(linter.mode).unwrap_or_default();

    Ok(LintConfig {
        rules,
        settings: DocSettings::from_linter_settings(linter, mode),
        require_returns_check: RequireReturnsCheckOptions::resolve(
            linter.require_returns_check.as_ref(),
            mode,
        ),
    })
}

/// Parse CLI rule arguments and return (selected_rules, ignored_rules).
///
/// Returns None for selected_rules if no --select was specified.
/// Returns empty set for ignored_rules if no --ignore was specified.
pub fn parse_rules_cli(select: &str, ignore: &str) -> Result<RuleSelection> {
    let selected_rules = if select.is_empty() {
        None
    } else {
        let passed_by_user = select.split(',').collect::<Vec<&str>>();
        Some(expand_rules(&passed_by_user).map_err(|invalid_rules| {
            anyhow::anyhow!("Unknown rules in `--select`: {}", invalid_rules.join(", "))
        })?)
    };

    let ignored_rules = if ignore.is_empty() {
        HashSet::new()
    } else {
        let passed_by_user = ignore.split(',').collect::<Vec<&str>>();
        expand_rules(&passed_by_user).map_err(|invalid_rules| {
            anyhow::anyhow!("Unknown rules in `--ignore`: {}", invalid_rules.join(", "))
        })?
    };

    Ok((selected_rules, ignored_rules))
}

/// Parse TOML configuration and return (selected_rules, ignored_rules).
///
/// Returns None for selected_rules if no TOML select was specified (meaning use all rules).
/// Returns empty set for ignored_rules if no TOML ignore was specified.
pub fn parse_rules_toml(toml_settings: Option<&Settings>) -> Result<RuleSelection> {
    let Some(settings) = toml_settings else {
        // No TOML configuration found
        return Ok((None, HashSet::new()));
    };

    let linter_settings = &settings.linter;

    let selected_rules = match &linter_settings.select {
        Some(select) => {
            let passed_by_user = select.iter().map(|s| s.as_str()).collect::<Vec<&str>>();
            Some(expand_rules(&passed_by_user).map_err(|invalid_rules| {
                anyhow::anyhow!(
                    "Unknown rules in field `select` in 'quill.toml': {}",
                    invalid_rules.join(", ")
                )
            })?)
        }
        None => None,
    };

    let ignored_rules = match &linter_settings.ignore {
        Some(ignore) => {
            let passed_by_user = ignore.iter().map(|s| s.as_str()).collect::<Vec<&str>>();
            expand_rules(&passed_by_user).map_err(|invalid_rules| {
                anyhow::anyhow!(
                    "Unknown rules in field `ignore` in 'quill.toml': {}",
                    invalid_rules.join(", ")
                )
            })?
        }
        None => HashSet::new(),
    };

    Ok((selected_rules, ignored_rules))
}

// Rule names and groups (e.g. "CORR") passed by the user become the set of
// rules they refer to. Returns the invalid names otherwise.
fn expand_rules(rules_passed_by_user: &[&str]) -> std::result::Result<HashSet<Rule>, Vec<String>> {
    let mut expanded_rules = HashSet::new();
    let mut invalid_rules = Vec::new();

    for &rule_or_group in rules_passed_by_user {
        let trimmed = rule_or_group.trim();

        if trimmed.is_empty() {
            invalid_rules.push(format!(
                "\"{rule_or_group}\" (empty or whitespace-only not allowed)"
            ));
        } else if let Ok(category) = trimmed.parse::<Category>() {
            expanded_rules.extend(Rule::by_category(category));
        } else if let Some(rule) = Rule::from_name(trimmed) {
            expanded_rules.insert(rule);
        } else {
            invalid_rules.push(trimmed.to_string());
        }
    }

    if invalid_rules.is_empty() {
        Ok(expanded_rules)
    } else {
        Err(invalid_rules)
    }
}

/// Reconcile rules from CLI and TOML configuration.
///
/// Strategy:
/// - CLI select takes precedence over TOML select
/// - CLI ignore and TOML ignore are combined (both applied)
/// - If neither CLI nor TOML specify select, start with the rules enabled by default
fn reconcile_rules(rules_cli: RuleSelection, rules_toml: RuleSelection) -> RuleSet {
    let (cli_selected, cli_ignored) = rules_cli;
    let (toml_selected, toml_ignored) = rules_toml;

    let base_selected: HashSet<Rule> = cli_selected
        .or(toml_selected)
        .unwrap_or_else(|| Rule::enabled_by_default().collect());

    ALL_RULES
        .iter()
        .filter(|rule| base_selected.contains(*rule))
        .filter(|rule| !cli_ignored.contains(*rule) && !toml_ignored.contains(*rule))
        .collect()
}
