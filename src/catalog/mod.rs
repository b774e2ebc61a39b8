//! Reading the chord dictionary and progression corpus from disk.
//!
//! Files are JSON unless the extension says YAML. Everything past this
//! module works on the in-memory `Chord` / `Progression` types.

pub mod models;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use models::{Bars, Chord, ChordRecord, Progression, ProgressionKind, ProgressionRecord};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref(),
        Some("yaml") | Some("yml")
    )
}

fn parse_records<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<Vec<T>> {
    if is_yaml(path) {
        serde_yaml::from_str(contents).map_err(|source| CatalogError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(contents).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(path, &contents)
}

/// Load the chord dictionary. A missing file is an empty dictionary.
pub fn load_chords(path: &Path) -> Result<Vec<Chord>> {
    if !path.exists() {
        log::warn!("Chord dictionary not found at {}, continuing with none", path.display());
        return Ok(Vec::new());
    }
    let records: Vec<ChordRecord> = read_records(path)?;
    log::info!("Loaded {} chords from {}", records.len(), path.display());
    Ok(records.into_iter().map(Chord::from).collect())
}

/// Load the progression corpus. A missing file is an empty corpus.
pub fn load_progressions(path: &Path) -> Result<Vec<Progression>> {
    if !path.exists() {
        log::warn!("Progression corpus not found at {}, continuing with none", path.display());
        return Ok(Vec::new());
    }
    let records: Vec<ProgressionRecord> = read_records(path)?;
    let progressions: Vec<Progression> = records.into_iter().map(Progression::from).collect();
    let loops = progressions.iter().filter(|p| p.kind == ProgressionKind::Loop).count();
    log::info!(
        "Loaded {} progressions ({} loops) from {}",
        progressions.len(),
        loops,
        path.display()
    );
    Ok(progressions)
}
