//! File-based hand-off between pipeline stages.
//!
//! Each stage persists its output under a single output directory so the next
//! stage (or a debugging operator) can pick it up. Artifacts are written once
//! and never mutated. JSON is pretty-printed UTF-8 with non-ASCII characters
//! left unescaped.

use std::path::{Path, PathBuf};

use crate::categorize::Buckets;
use crate::note::NoteRecord;
use crate::{Result, TripnotesError};

/// Fixed output name of the categorize stage.
pub const BUCKETS_FILE: &str = "categorized.json";

/// Fixed output name of the rendered outline.
pub const MINDMAP_FILE: &str = "mindmap.mmd";

/// Default artifact directory, relative to the working directory.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Resolves a stage input path; relative paths land in the output directory.
pub fn resolve_input(path: &Path, output_dir: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { output_dir.join(path) }
}

/// Saves collected notes under a timestamped name, returning the path.
pub fn save_notes(notes: &[NoteRecord], output_dir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("notes_{timestamp}.json"));
    write_json(&path, notes)?;
    Ok(path)
}

/// Loads a notes artifact, failing with `InputNotFound` when absent.
pub fn load_notes(path: &Path) -> Result<Vec<NoteRecord>> {
    read_json(path)
}

/// Saves categorized buckets under the fixed name, returning the path.
pub fn save_buckets(buckets: &Buckets, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(BUCKETS_FILE);
    write_json(&path, buckets)?;
    Ok(path)
}

/// Loads a buckets artifact, failing with `InputNotFound` when absent.
pub fn load_buckets(path: &Path) -> Result<Buckets> {
    read_json(path)
}

/// Writes a rendered text artifact under the given name, returning the path.
pub fn save_text(name: &str, contents: &str, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(TripnotesError::InputNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
