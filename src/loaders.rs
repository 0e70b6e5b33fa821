use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;

use crate::extract;
use crate::{MagpieError, Result};

/// Checked first; the extension scan only runs when none of these exist.
pub const CONVENTIONAL_FILES: &[&str] =
    &["messages.csv", "messages.json", "corpus.csv", "corpus.json"];

/// Corpus items pulled from a data directory.
#[derive(Debug)]
pub struct DirCorpus {
    pub files_loaded: usize,
    pub items: Vec<String>,
}

/// Quote-toggle field splitter. A `"` flips the in-quotes flag and is kept
/// verbatim; `,` splits only outside quotes. Doubled quotes inside a quoted
/// field are not collapsed to a literal quote; known limitation.
pub fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn strip_quotes(field: &str) -> &str {
    field.trim().trim_matches('"').trim()
}

/// Parse CSV text into corpus items. The first line is the header; the
/// content column is the first header containing one of the candidate
/// names. Rows whose content field is empty are skipped.
pub fn csv_items(input: &str) -> Result<Vec<String>> {
    let mut lines = input.lines();
    let header = lines.next().unwrap_or("");

    let columns = split_csv_row(header);
    let content_idx = columns
        .iter()
        .position(|col| {
            let lowered = strip_quotes(col).to_lowercase();
            extract::FIELD_CANDIDATES
                .iter()
                .any(|candidate| lowered.contains(candidate))
        })
        .ok_or_else(|| MagpieError::ColumnNotFound(header.to_string()))?;

    let mut items = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_row(line);
        let Some(raw) = fields.get(content_idx) else {
            continue;
        };
        let text = strip_quotes(raw);
        if !text.is_empty() {
            items.push(text.to_string());
        }
    }
    Ok(items)
}

/// Parse JSON text into corpus items. An array is a sequence of records, a
/// lone object is a single record; anything else yields nothing. Records
/// without extractable text are skipped.
pub fn json_items(input: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(input)?;
    let items = match &value {
        Value::Array(records) => records.iter().filter_map(extract::extract_text).collect(),
        Value::Object(_) => extract::extract_text(&value).into_iter().collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

/// Find training files in `dir`: conventional names first, otherwise any
/// `.csv` or `.json` file. Sorted for a stable ingest order.
pub fn discover_files(dir: &Path) -> Vec<PathBuf> {
    let conventional: Vec<PathBuf> = CONVENTIONAL_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect();
    if !conventional.is_empty() {
        return conventional;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .par_bridge()
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !path.is_file() {
                return None;
            }
            let ext = path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase();
            matches!(ext.as_str(), "csv" | "json").then_some(path)
        })
        .collect();
    found.sort();
    found
}

/// Load every discovered file, routing by extension. An unreadable or
/// unparseable file is logged and skipped; the batch fails only when
/// nothing at all could be loaded.
pub fn load_dir(dir: &Path) -> Result<DirCorpus> {
    let files = discover_files(dir);
    if files.is_empty() {
        return Err(MagpieError::NoTrainingFiles);
    }

    let contents: Vec<(PathBuf, std::io::Result<String>)> = files
        .par_iter()
        .map(|path| (path.clone(), fs::read_to_string(path)))
        .collect();

    let mut files_loaded = 0;
    let mut items = Vec::new();
    for (path, content) in contents {
        let content = match content {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("skipping {}: {err}", path.display());
                continue;
            }
        };

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        let parsed = match ext.as_deref() {
            Some("csv") => csv_items(&content),
            Some("json") => json_items(&content),
            _ => continue,
        };

        match parsed {
            Ok(file_items) => {
                tracing::info!("loaded {} items from {}", file_items.len(), path.display());
                files_loaded += 1;
                items.extend(file_items);
            }
            Err(err) => tracing::warn!("skipping {}: {err}", path.display()),
        }
    }

    if files_loaded == 0 || items.is_empty() {
        return Err(MagpieError::EmptyCorpus);
    }
    Ok(DirCorpus { files_loaded, items })
}
