use clap::ValueEnum;
use colored::Colorize;
use quill_core::diagnostic::Diagnostic;
use quill_core::error::ParseError;
use quill_core::fs::relativize_path;
use quill_core::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{BufWriter, Write};

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonError {
    file: String,
    error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    /// Print diagnostics in a concise format, one per line
    Concise,
    /// Print diagnostics as GitHub format
    Github,
    /// Print diagnostics as JSON
    Json,
}

/// Takes the diagnostics and parsing errors in each file and then displays
/// them in different ways depending on the `--output-format` provided by the
/// user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()>;
}

/// Print file errors on stderr. Malformed declaration files only show the
/// parse error, not the whole context chain.
fn print_errors(errors: &[(String, anyhow::Error)]) {
    for (path, err) in errors {
        match err.chain().find_map(|cause| cause.downcast_ref::<ParseError>()) {
            Some(parse_error) => eprintln!("{}: {}", "Error".red().bold(), parse_error),
            None => eprintln!("{}: {:#} ({})", "Error".red().bold(), err, path),
        }
    }
}

fn message_text(diagnostic: &Diagnostic) -> String {
    match &diagnostic.message.suggestion {
        Some(suggestion) => format!("{} {}", diagnostic.message.body, suggestion),
        None => diagnostic.message.body.clone(),
    }
}

/// Row and column of a diagnostic, both already 1-based.
fn row_col(diagnostic: &Diagnostic) -> (usize, usize) {
    let loc = diagnostic
        .location
        .unwrap_or_else(|| Location::from(diagnostic.range));
    (loc.row(), loc.column())
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        if !errors.is_empty() {
            writer.flush()?;
            print_errors(errors);
        }

        let mut path_cache = HashMap::new();

        for diagnostic in diagnostics {
            let (row, col) = row_col(diagnostic);

            let relative_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(&diagnostic.filename));

            writeln!(
                writer,
                "{} [{}:{}] {} {}",
                relative_path.white(),
                row,
                col,
                diagnostic.message.name.red(),
                message_text(diagnostic)
            )?;
        }

        let total_diagnostics = diagnostics.len();
        if total_diagnostics > 0 {
            if total_diagnostics > 1 {
                writeln!(writer, "\nFound {total_diagnostics} errors.")?;
            } else {
                writeln!(writer, "\nFound 1 error.")?;
            }
        } else if errors.is_empty() {
            writeln!(writer, "All checks passed!")?;
        }

        writer.flush()?;
        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        let json_errors: Vec<JsonError> = errors
            .iter()
            .map(|(path, err)| JsonError { file: path.clone(), error: format!("{err:#}") })
            .collect();

        let output = JsonOutput {
            diagnostics: diagnostics.to_vec(),
            errors: json_errors,
        };

        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub struct GithubEmitter;

impl Emitter for GithubEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        for diagnostic in diagnostics {
            let (row, col) = row_col(diagnostic);

            // The location appears twice: between the "::" markers for the
            // PR annotation, and after them for the raw workflow log.
            write!(
                writer,
                "::warning title=quill ({}),file={file},line={row},col={col}::{file}:{row}:{col} ",
                diagnostic.message.name,
                file = diagnostic.filename.to_string_lossy()
            )?;
            writeln!(
                writer,
                "[{}] {}",
                diagnostic.message.name,
                message_text(diagnostic)
            )?;
        }

        for (path, err) in errors {
            writeln!(writer, "::error file={path}::{err:#}")?;
        }

        writer.flush()?;
        Ok(())
    }
}
