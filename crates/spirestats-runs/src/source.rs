use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::parser::{parse_run, run_id};
use crate::predicates::sort_key;
use crate::types::{Character, RunFilter, RunRecord};

/// An entry found under a character's run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEntry {
    File { id: String, path: PathBuf },
    Dir { path: PathBuf },
}

impl RunEntry {
    pub fn path(&self) -> &Path {
        match self {
            RunEntry::File { path, .. } | RunEntry::Dir { path } => path,
        }
    }
}

/// Where run documents come from.
pub trait RunSource {
    /// Entries for one character, files and directories alike.
    fn entries(&self, character: Character) -> Result<Vec<RunEntry>>;

    /// Full raw text of a file entry.
    fn read(&self, entry: &RunEntry) -> Result<String>;
}

/// Runs stored on disk as `<runs_dir>/<CHARACTER_ID>/<id>.run`.
pub struct DirRunSource {
    runs_dir: PathBuf,
}

impl DirRunSource {
    pub fn new(runs_dir: impl Into<PathBuf>) -> Self {
        Self {
            runs_dir: runs_dir.into(),
        }
    }

    pub fn runs_dir(&self) -> &Path {
        &self.runs_dir
    }

    pub fn character_dir(&self, character: Character) -> PathBuf {
        self.runs_dir.join(character.id())
    }
}

impl RunSource for DirRunSource {
    fn entries(&self, character: Character) -> Result<Vec<RunEntry>> {
        let dir = self.character_dir(character);
        if !dir.exists() {
            tracing::debug!(character = %character, "No run directory at {:?}", dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let listing = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read run dir: {:?}", dir))?;

        for entry in listing {
            let path = entry
                .with_context(|| format!("Failed to read entry in run dir: {:?}", dir))?
                .path();
            if path.is_dir() {
                entries.push(RunEntry::Dir { path });
            } else {
                entries.push(RunEntry::File {
                    id: run_id(&path),
                    path,
                });
            }
        }

        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }

    fn read(&self, entry: &RunEntry) -> Result<String> {
        match entry {
            RunEntry::File { path, .. } => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read run file: {:?}", path)),
            RunEntry::Dir { path } => bail!("Not a run file: {:?}", path),
        }
    }
}

/// Load every run file for a character. Directory entries are dropped here.
pub fn load_runs(source: &dyn RunSource, character: Character) -> Result<Vec<RunRecord>> {
    let mut runs = Vec::new();
    for entry in source.entries(character)? {
        if let RunEntry::File { ref id, .. } = entry {
            let raw_text = source.read(&entry)?;
            runs.push(parse_run(id.clone(), raw_text));
        }
    }

    tracing::info!(character = %character, runs = runs.len(), "Loaded runs");
    Ok(runs)
}

/// Load and concatenate runs for several characters, in the given order.
pub fn load_all(source: &dyn RunSource, characters: &[Character]) -> Result<Vec<RunRecord>> {
    let mut runs = Vec::new();
    for &character in characters {
        runs.extend(load_runs(source, character)?);
    }
    Ok(runs)
}

/// Runs matching the filter, newest first.
///
/// Runs the filter cannot evaluate, or without a usable `local_time`, are skipped
/// with a warning.
pub fn list_runs(source: &dyn RunSource, filter: &RunFilter) -> Result<Vec<RunRecord>> {
    let characters: Vec<Character> = match filter.character {
        Some(c) => vec![c],
        None => Character::ALL.to_vec(),
    };

    let mut keyed = Vec::new();
    for run in load_all(source, &characters)? {
        match filter.matches(&run) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                tracing::warn!("Skipping run {}: {}", run.id, e);
                continue;
            }
        }
        match sort_key(&run) {
            Ok(key) => keyed.push((key, run)),
            Err(e) => tracing::warn!("Skipping run {}: {}", run.id, e),
        }
    }

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, run)| run).collect())
}
