//! Index synthesis: collect generated bindings and write a module that
//! re-exports each of them under a name derived from its file stem.
//!
//! Output shape, one line per generated file:
//!
//! ```text
//! export * as Foo from "./foo";
//! ```

use std::ffi::OsStr;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::error::SyncError;

/// How export names are derived from file stems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportNaming {
    /// Title-case every word start, lower-case the rest; uncased characters
    /// pass through (`bar-baz` -> `Bar-Baz`). See [`title_case`].
    #[default]
    TitleCase,
    /// Split on non-alphanumerics and join capitalised segments
    /// (`bar-baz` -> `BarBaz`). Always a valid identifier.
    PascalCase,
}

impl ExportNaming {
    pub fn apply(self, stem: &str) -> String {
        match self {
            ExportNaming::TitleCase => title_case(stem),
            ExportNaming::PascalCase => pascal_case(stem),
        }
    }
}

/// Order of the emitted export lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrder {
    /// Sorted by file name, stable across filesystems.
    #[default]
    Sorted,
    /// Whatever order the directory listing yields.
    Listing,
}

/// A generated binding found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub stem: String,
}

/// What was written by [`synthesise`].
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub path: PathBuf,
    pub exports: Vec<String>,
}

/// Python-style `str.title()`: a cased character that follows another cased
/// character is lower-cased, every other character is title-cased.
///
/// "Cased" means the character has an upper or lower case mapping, so `中`
/// and modifier letters like `ʰ` break a word. Title case is the upper-case
/// mapping with multi-char expansions reduced to a leading capital (`ß` ->
/// `Ss`) plus the four Latin digraphs (`ǆ` -> `ǅ`). Characters whose title
/// form is not derivable that way (`ŉ`) follow the upper-case mapping shape.
pub fn title_case(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut prev_is_cased = false;
    for c in stem.chars() {
        if prev_is_cased {
            out.extend(c.to_lowercase());
        } else {
            push_title(&mut out, c);
        }
        prev_is_cased = is_cased(c);
    }
    out
}

fn is_cased(c: char) -> bool {
    c.to_lowercase().ne(std::iter::once(c)) || c.to_uppercase().ne(std::iter::once(c))
}

fn push_title(out: &mut String, c: char) {
    let digraph = match c {
        'Ǆ' | 'ǅ' | 'ǆ' => Some('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => Some('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => Some('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => Some('ǲ'),
        _ => None,
    };
    if let Some(title) = digraph {
        out.push(title);
        return;
    }
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}

pub fn pascal_case(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    for segment in stem.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Lists files directly inside `dir` with the given extension. Dotfiles and
/// the index file itself are skipped and a missing directory yields nothing.
pub fn collect(
    dir: &Path,
    extension: &str,
    index_file_name: &str,
    order: IndexOrder,
) -> Result<Vec<GeneratedFile>, SyncError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %dir.display(), "Output directory missing, nothing to index");
            return Ok(Vec::new());
        }
        Err(e) => return Err(SyncError::io("read directory", dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SyncError::io("read directory", dir, e))?;
        let path = entry.path();
        let name = entry.file_name();
        if name.as_encoded_bytes().starts_with(b".") {
            continue;
        }
        if !path.is_file() || name.as_os_str() == OsStr::new(index_file_name) {
            continue;
        }
        if path.extension() != Some(OsStr::new(extension)) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            debug!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        files.push(GeneratedFile {
            stem: stem.to_string(),
            path,
        });
    }

    if order == IndexOrder::Sorted {
        files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    }
    Ok(files)
}

pub fn export_line(file: &GeneratedFile, naming: ExportNaming) -> String {
    format!(
        "export * as {} from \"./{}\";\n",
        naming.apply(&file.stem),
        file.stem
    )
}

pub fn render(files: &[GeneratedFile], naming: ExportNaming) -> String {
    files.iter().map(|f| export_line(f, naming)).collect()
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub fn write_index(path: &Path, contents: &str) -> Result<(), SyncError> {
    let mut file = crate::fs::create_file(path)?;
    file.write_all(contents.as_bytes())
        .map_err(|e| SyncError::io("write", path, e))
}

/// Collects, renders and writes the index for `config`.
pub fn synthesise(config: &SyncConfig) -> Result<IndexReport, SyncError> {
    let output_dir = config.output_path();
    let files = collect(
        &output_dir,
        &config.generator.extension,
        &config.index.file_name,
        config.index.order,
    )?;
    info!(
        count = files.len(),
        path = %output_dir.display(),
        "Collected compiled schemas"
    );

    let path = config.index_path();
    write_index(&path, &render(&files, config.index.naming))?;
    info!(path = %path.display(), exports = files.len(), "Wrote index");

    Ok(IndexReport {
        path,
        exports: files
            .iter()
            .map(|f| config.index.naming.apply(&f.stem))
            .collect(),
    })
}
