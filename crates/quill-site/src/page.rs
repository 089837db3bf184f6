//! Page discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use quill_summary::{Document, SummaryMarkers, extract_summary};

use crate::BuildError;
use crate::front_matter;

/// A markdown page after the extraction pass.
#[derive(Debug, Clone)]
pub struct Page {
    /// Path relative to the source directory.
    pub path: PathBuf,
    pub title: String,
    pub document: Document,
    /// Source lines before the body (the front matter block).
    pub line_offset: usize,
    /// The summary was given in front matter rather than marked in the body.
    pub summary_from_front_matter: bool,
}

impl Page {
    /// Output path relative to the output directory: `posts/a.md` -> `posts/a.html`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.path.with_extension("html")
    }

    /// Output path with `/` separators, as listed in `summaries.json`.
    #[must_use]
    pub fn url_path(&self) -> String {
        self.output_path()
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Find `*.md` files under `source_dir`, sorted by relative path.
///
/// Hidden files and directories are skipped.
pub fn scan(source_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !source_dir.is_dir() {
        return Err(BuildError::SourceNotFound(source_dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    scan_directory(source_dir, Path::new(""), &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn scan_directory(dir: &Path, relative: &Path, paths: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    let entries = fs::read_dir(dir).map_err(BuildError::io(dir))?;

    for entry in entries {
        let entry = entry.map_err(BuildError::io(dir))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let child = relative.join(&name);
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &child, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            paths.push(child);
        }
    }
    Ok(())
}

/// Read a page, parse its front matter and extract its summary.
pub fn load(
    source_dir: &Path,
    relative: &Path,
    markers: &SummaryMarkers,
) -> Result<Page, BuildError> {
    let full_path = source_dir.join(relative);
    let text = fs::read_to_string(&full_path).map_err(BuildError::io(&full_path))?;
    let (front_matter, body) =
        front_matter::split(&text).map_err(|source| BuildError::FrontMatter {
            path: full_path.clone(),
            source,
        })?;

    let line_offset = text[..text.len() - body.len()].matches('\n').count();
    let summary_from_front_matter = front_matter.summary.is_some();

    let mut document = Document::new(body);
    if let Some(summary) = front_matter.summary {
        document = document.with_summary(summary);
    }
    extract_summary(&mut document, markers);

    let title = front_matter.title.unwrap_or_else(|| {
        relative
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    Ok(Page {
        path: relative.to_path_buf(),
        title,
        document,
        line_offset,
        summary_from_front_matter,
    })
}
