use colored::Colorize;
use quill_core::diagnostic::Diagnostic;
use std::{collections::HashMap, path::PathBuf};

use crate::status::ExitStatus;

pub fn print_statistics(
    diagnostics: &[&Diagnostic],
    parent_config_path: Option<PathBuf>,
) -> anyhow::Result<ExitStatus> {
    if diagnostics.is_empty() {
        println!("All checks passed!");
        return Ok(ExitStatus::Success);
    }

    for (count, rule_name) in count_by_rule(diagnostics) {
        println!("{:>5} {}", count.to_string().bold(), rule_name.bold().red());
    }

    if let Some(config_path) = parent_config_path {
        println!("\nUsed '{}'", config_path.display());
    }

    Ok(ExitStatus::Failure)
}

/// Number of violations per rule, most frequent first, ties by name.
fn count_by_rule<'a>(diagnostics: &[&'a Diagnostic]) -> Vec<(usize, &'a str)> {
    let mut hm: HashMap<&str, usize> = HashMap::new();
    for &diagnostic in diagnostics {
        *hm.entry(diagnostic.message.name.as_str()).or_default() += 1;
    }

    let mut sorted: Vec<_> = hm.into_iter().map(|(name, count)| (count, name)).collect();
    sorted.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));
    sorted
}
