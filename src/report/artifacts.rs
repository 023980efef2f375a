use crate::{document::{FlatStep, Suite},
            error::Result,
            report::SuiteReport};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use std::{fs,
          path::{Path, PathBuf}};

/// Run directory name for documents whose stem has no letters or digits
const UNNAMED_DOCUMENT: &str = "document";

/// Metadata recorded for a document before any of its steps run
#[derive(Debug, Serialize)]
pub struct RunMeta<'a> {
    pub suite: &'a str,
    pub file: String,
    pub steps: Vec<FlatStep>,
}

/// File-system layout of everything a run writes:
///
/// - `<root>/exec/<slug>/meta.json`, `result.json`, `page-<n>.html`
/// - `<root>/exec-debug/last-page.html`, `last-page.<ext>`
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the artifacts of one document
    pub fn run_dir(&self, document: &Path) -> PathBuf {
        let stem = document.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let name = match slug(&stem) {
            name if name.is_empty() => UNNAMED_DOCUMENT.to_string(),
            name => name,
        };
        self.root.join("exec").join(name)
    }

    pub fn debug_dir(&self) -> PathBuf {
        self.root.join("exec-debug")
    }

    /// Write `meta.json` for a document. Returns the path written.
    pub fn write_meta(&self, document: &Path, suite: &Suite) -> Result<PathBuf> {
        let meta = RunMeta { suite: &suite.name, file: document.display().to_string(), steps: suite.flat_steps() };
        self.write_json(&self.run_dir(document).join("meta.json"), &meta)
    }

    pub fn write_result(&self, document: &Path, report: &SuiteReport) -> Result<PathBuf> {
        self.write_json(&self.run_dir(document).join("result.json"), report)
    }

    /// Markup captured after the `index`-th navigate step of a document
    pub fn write_page(&self, document: &Path, index: usize, html: &str) -> Result<PathBuf> {
        let dir = self.run_dir(document);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("page-{}.html", index));
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Markup of the page at the moment a target could not be resolved
    pub fn write_debug_html(&self, html: &str) -> Result<PathBuf> {
        let dir = self.debug_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join("last-page.html");
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Decode a base64 screenshot into the debug directory
    pub fn write_debug_screenshot(&self, data: &str, mime_type: &str) -> Result<PathBuf> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let dir = self.debug_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("last-page.{}", image_extension(mime_type)));
        fs::write(&path, bytes)?;
        Ok(path)
    }

    fn write_json(&self, path: &Path, value: &impl Serialize) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(path.to_path_buf())
    }
}

fn image_extension(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

/// File-name-safe form of a document name: runs of anything but Unicode
/// letters and digits become `-`, max 80 chars
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').chars().take(80).collect()
}
