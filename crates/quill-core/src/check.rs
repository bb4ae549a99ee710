use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::analyze;
use crate::config::{Config, LintConfig};
use crate::declaration::DeclarationFile;
use crate::diagnostic::*;
use crate::error::ParseError;
use crate::fs::relativize_path;
use crate::lints::RequireReturnsCheckOptions;
use crate::location::Location;
use crate::rule_set::{Rule, RuleSet};
use crate::settings::DocSettings;

pub fn check(config: Config) -> Vec<(String, Result<Vec<Diagnostic>, anyhow::Error>)> {
    // Wrap config in Arc to avoid expensive clones in parallel execution
    let config = Arc::new(config);

    config
        .paths
        .par_iter()
        .map(|file| {
            let res = check_path(file, Arc::clone(&config));
            (relativize_path(file), res)
        })
        .collect()
}

pub fn check_path(path: &Path, config: Arc<Config>) -> Result<Vec<Diagnostic>, anyhow::Error> {
    let lint_config = config.lint_config(path);
    let path = relativize_path(path);
    let contents = fs::read_to_string(Path::new(&path))
        .with_context(|| format!("Failed to read file: {path}"))?;

    let checks = get_checks(&contents, &PathBuf::from(&path), lint_config)
        .with_context(|| format!("Failed to get checks for file: {path}"))?;

    Ok(checks)
}

#[derive(Debug)]
// The object that collects diagnostics while walking the declarations of
// one file.
pub struct Checker {
    // The diagnostics to report (possibly empty).
    pub diagnostics: Vec<Diagnostic>,
    // The rules to apply to each declaration.
    pub rules: RuleSet,
    // Mode, tag name preferences and document-level gates.
    pub settings: DocSettings,
    pub require_returns_check: RequireReturnsCheckOptions,
}

impl Checker {
    fn new(config: &LintConfig) -> Self {
        Self {
            diagnostics: vec![],
            rules: config.rules.clone(),
            settings: config.settings.clone(),
            require_returns_check: config.require_returns_check,
        }
    }

    // This takes an Option<Diagnostic> because each lint rule reports a
    // Some(Diagnostic) or None.
    pub(crate) fn report_diagnostic(&mut self, diagnostic: Option<Diagnostic>) {
        if let Some(diagnostic) = diagnostic {
            self.diagnostics.push(diagnostic);
        }
    }

    pub(crate) fn is_rule_enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }
}

// Takes the content of a declaration file, deserializes it, and obtains a
// (possibly empty) vector of `Diagnostic`s, sorted by location.
pub fn get_checks(contents: &str, file: &Path, config: &LintConfig) -> Result<Vec<Diagnostic>> {
    let declaration_file: DeclarationFile = serde_json::from_str(contents)
        .map_err(|source| ParseError { filename: file.to_path_buf(), source })?;

    let mut checker = Checker::new(config);
    for declaration in &declaration_file.declarations {
        analyze::declaration::declaration(declaration, &mut checker)?;
    }

    let mut diagnostics: Vec<Diagnostic> = checker
        .diagnostics
        .into_iter()
        .map(|mut x| {
            x.filename = file.to_path_buf();
            x.location = Some(Location::from(x.range));
            x
        })
        .collect();
    diagnostics.sort();

    Ok(diagnostics)
}
