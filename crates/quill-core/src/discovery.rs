//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/discovery.rs
//
// MIT License - Posit PBC

use ignore::DirEntry;
use rustc_hash::FxHashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::fs;
use crate::fs::has_declaration_extension;
use crate::resolve::PathResolver;
use crate::settings::Settings;
use crate::toml::find_quill_toml_in_directory;
use crate::toml::parse_quill_toml;
use etcetera::BaseStrategy;

/// Default patterns to exclude from checking
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[".git/", "node_modules/"];

#[derive(Debug)]
pub struct DiscoveredSettings {
    pub directory: PathBuf,
    pub settings: Settings,
    /// Path to the config file that was used
    pub config_path: Option<PathBuf>,
}

/// Get the user config directory for quill
fn get_user_config_dir() -> Option<PathBuf> {
    let strategy = etcetera::base_strategy::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("quill"))
}

/// This is the core function for walking a set of `paths` looking for `quill.toml`s.
///
/// You typically follow this function up by loading the set of returned path into a
/// [crate::resolve::PathResolver].
///
/// For each `path`, we:
/// - Walk up its ancestors until the user config directory, looking for a `quill.toml`
/// - If no config found in ancestors, fall back to checking the user config directory
pub fn discover_settings<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<DiscoveredSettings>> {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let mut seen = FxHashSet::default();
    let mut discovered_settings = Vec::with_capacity(paths.len());
    let user_config_dir = get_user_config_dir();

    // Discover all `Settings` across all `paths`, looking up each path's directory tree
    for path in &paths {
        let mut found_config = false;

        for ancestor in path.ancestors() {
            let is_new_ancestor = seen.insert(ancestor);

            if !is_new_ancestor {
                // We already visited this ancestor, we can stop here.
                break;
            }

            if let Some(toml) = find_quill_toml_in_directory(ancestor) {
                let settings = parse_settings(&toml, ancestor)?;
                discovered_settings.push(DiscoveredSettings {
                    directory: ancestor.to_path_buf(),
                    settings,
                    config_path: Some(toml),
                });
                found_config = true;
                break;
            }

            // Stop at user config directory if we have one
            if let Some(ref config_dir) = user_config_dir
                && ancestor == config_dir
            {
                break;
            }
        }

        // If no config found in ancestors, check user config directory as fallback
        if !found_config
            && let Some(ref config_dir) = user_config_dir
            && seen.insert(config_dir.as_path())
            && let Some(toml) = find_quill_toml_in_directory(config_dir)
        {
            let settings = parse_settings(&toml, config_dir)?;
            discovered_settings.push(DiscoveredSettings {
                directory: config_dir.clone(),
                settings,
                config_path: Some(toml),
            });
        }
    }

    Ok(discovered_settings)
}

/// Parse [Settings] from a given `quill.toml`
fn parse_settings(toml: &Path, root_directory: &Path) -> anyhow::Result<Settings> {
    let options = parse_quill_toml(toml)?;
    let settings = options.into_settings(root_directory)?;
    Ok(settings)
}

type DiscoveredFiles = Vec<Result<PathBuf, ignore::Error>>;

/// For each provided `path`, recursively search for any declaration files
/// within that `path` that match our inclusion criteria
///
/// NOTE: Make sure that the inclusion criteria that guide `path` discovery are also
/// consistently applied to [discover_settings()].
pub fn discover_declaration_paths<P: AsRef<Path>>(
    paths: &[P],
    resolver: &PathResolver<Settings>,
    no_default_exclude: bool,
) -> DiscoveredFiles {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let Some((first_path, paths)) = paths.split_first() else {
        // No paths provided
        return Vec::new();
    };

    let mut builder = ignore::WalkBuilder::new(first_path);

    for path in paths {
        builder.add(path);
    }

    builder.hidden(true);
    builder.parents(true);
    builder.ignore(false);
    builder.git_ignore(true);
    builder.git_global(true);
    builder.git_exclude(true);

    // Build custom ignore patterns
    let mut patterns = Vec::new();

    // Default root directory if no settings found
    let mut root = first_path.as_path();

    if let Some(settings_item) = resolver.items().first() {
        let settings = settings_item.value();
        root = settings_item.path();

        // Add custom exclude patterns from quill.toml
        if let Some(exclude_patterns) = &settings.linter.exclude {
            for pattern in exclude_patterns {
                patterns.push(pattern.as_str());
            }
        }
        if !no_default_exclude && settings.linter.default_exclude.unwrap_or(true) {
            patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
        }
    } else if !no_default_exclude {
        patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
    }

    // If we have patterns, create an override and add it to the builder
    if !patterns.is_empty() {
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in patterns {
            // Add as negation pattern (exclude)
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("Failed to add exclude pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("Failed to build exclude patterns: {}", e),
        }
    }

    // Prefer `available_parallelism()`, with a max of 12 threads
    builder.threads(
        std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(12),
    );

    let walker = builder.build_parallel();

    // Run the `WalkParallel` to collect all declaration files.
    let state = FilesState::new();
    let mut visitor_builder = FilesVisitorBuilder::new(&state);
    walker.visit(&mut visitor_builder);

    let mut files = state.finish();
    // The parallel walker visits in no particular order.
    files.sort_by(|a, b| match (a, b) {
        (Ok(a), Ok(b)) => a.cmp(b),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });
    files
}

/// Shared state across the threads of the walker
struct FilesState {
    files: std::sync::Mutex<DiscoveredFiles>,
}

impl FilesState {
    fn new() -> Self {
        Self { files: std::sync::Mutex::new(Vec::new()) }
    }

    fn finish(self) -> DiscoveredFiles {
        // A poisoned lock still holds every file pushed before the panic.
        self.files
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Object capable of building a [FilesVisitor]
///
/// Implements the `build()` method of [ignore::ParallelVisitorBuilder], which
/// [ignore::WalkParallel] utilizes to create one [FilesVisitor] per thread.
struct FilesVisitorBuilder<'state> {
    state: &'state FilesState,
}

impl<'state> FilesVisitorBuilder<'state> {
    fn new(state: &'state FilesState) -> Self {
        Self { state }
    }
}

impl<'state> ignore::ParallelVisitorBuilder<'state> for FilesVisitorBuilder<'state> {
    /// Constructs the per-thread [FilesVisitor], called for us by `ignore`
    fn build(&mut self) -> Box<dyn ignore::ParallelVisitor + 'state> {
        Box::new(FilesVisitor { files: vec![], state: self.state })
    }
}

/// Object that implements [ignore::ParallelVisitor]'s `visit()` method
///
/// A files visitor has its `visit()` method repeatedly called. It modifies its own
/// synchronous state by pushing to its thread specific `files` while visiting. On `Drop`,
/// the collected `files` are appended to the global set of `state.files`.
struct FilesVisitor<'state> {
    files: DiscoveredFiles,
    state: &'state FilesState,
}

impl ignore::ParallelVisitor for FilesVisitor<'_> {
    /// Visit a file in the tree
    ///
    /// Explicitly provided files are always accepted. Inside directories, only
    /// files ending with `.quill.json` are.
    fn visit(&mut self, result: std::result::Result<DirEntry, ignore::Error>) -> ignore::WalkState {
        // Determine if `ignore` gave us a valid `result` or not
        let entry = match result {
            Ok(entry) => entry,
            Err(error) => {
                // Store error but continue walking
                self.files.push(Err(error));
                return ignore::WalkState::Continue;
            }
        };

        let path = entry.path();

        // An entry is explicit if it was provided directly, not discovered by looking into a directory
        let is_explicit = entry.depth() == 0;
        let is_directory = entry.file_type().is_none_or(|ft| ft.is_dir());

        if is_explicit && !is_directory {
            tracing::trace!(
                "Included file due to explicit provision {path}",
                path = path.display()
            );
            self.files.push(Ok(entry.into_path()));
            return ignore::WalkState::Continue;
        }

        if !is_directory && has_declaration_extension(path) {
            tracing::trace!("Included declaration file {path}", path = path.display());
            self.files.push(Ok(entry.into_path()));
            return ignore::WalkState::Continue;
        }

        // Didn't accept this file, just keep going
        tracing::trace!(
            "Excluded file due to fallthrough {path}",
            path = path.display()
        );
        ignore::WalkState::Continue
    }
}

impl Drop for FilesVisitor<'_> {
    fn drop(&mut self) {
        // Lock the global shared set of `files`
        let mut files = match self.state.files.lock() {
            Ok(files) => files,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Transfer files gathered on this thread to the global set
        if files.is_empty() {
            *files = std::mem::take(&mut self.files);
        } else {
            files.append(&mut self.files);
        }
    }
}
