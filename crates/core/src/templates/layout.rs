//! Template directory layout.
//!
//! A template directory holds three kinds of files, told apart by the
//! second-to-last dot segment of the file name:
//!
//! - `home.page.html`: a page, compiled into its own cache entry
//! - `base.layout.html`: a layout, shared wrapper markup
//! - `footer.partial.html`: a partial, shared sub-component
//!
//! Anything else in the directory is ignored.

use std::path::{Path, PathBuf};

use crate::Error;

/// Category of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Page,
    Layout,
    Partial,
}

impl TemplateKind {
    /// Classify a path by its file name, e.g. `show.page.html` is a page.
    pub fn of(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?;
        match Path::new(stem).extension()?.to_str()? {
            "page" => Some(Self::Page),
            "layout" => Some(Self::Layout),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }
}

/// A template source read from disk.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    /// File name, used as the template's name (`base.layout.html`).
    pub name: String,
    pub body: String,
}

/// Every page, layout and partial in a directory, each list in name order.
#[derive(Debug, Default)]
pub struct TemplateSet {
    pub pages: Vec<TemplateSource>,
    pub layouts: Vec<TemplateSource>,
    pub partials: Vec<TemplateSource>,
}

impl TemplateSet {
    /// Read and classify every template file directly inside `dir`.
    ///
    /// Subdirectories are not descended into.
    pub fn discover(dir: &Path) -> Result<Self, Error> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| Error::TemplateIo { path, source }
        };

        let mut files: Vec<(PathBuf, TemplateKind)> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(kind) = TemplateKind::of(&path) {
                files.push((path, kind));
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut set = TemplateSet::default();
        for (path, kind) in files {
            let body = std::fs::read_to_string(&path).map_err(io_err(&path))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = TemplateSource { name, body };
            match kind {
                TemplateKind::Page => set.pages.push(source),
                TemplateKind::Layout => set.layouts.push(source),
                TemplateKind::Partial => set.partials.push(source),
            }
        }

        Ok(set)
    }

    /// Layouts followed by partials, the order they are registered after a page.
    pub fn shared(&self) -> impl Iterator<Item = &TemplateSource> {
        self.layouts.iter().chain(self.partials.iter())
    }
}
