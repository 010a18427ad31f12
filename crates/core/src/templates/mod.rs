//! Pre-compiled page template cache.
//!
//! At startup every page in the template directory is compiled together with
//! all layouts and partials into its own Tera instance. Lookups at request
//! time are by page file name and never parse anything.
//!
//! A [`TemplateCache`] can only be obtained from [`TemplateCache::build`] and
//! exposes no way to change it, so once built it can be shared behind an
//! `Arc` and rendered from any number of threads.

pub mod layout;

use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tera::ast::Node;
use tera::{Context, Tera};

use crate::Error;
pub use layout::{TemplateKind, TemplateSet, TemplateSource};

/// Context key under which render data that is not a map is exposed.
///
/// A struct or map is spread into the context so pages read `snippets`
/// directly; anything else (a list, a string, `()`) is reachable as `data`.
pub const DATA_KEY: &str = "data";

/// Compiled pages keyed by file name (`home.page.html`).
#[derive(Debug)]
pub struct TemplateCache {
    pages: HashMap<String, Tera>,
}

impl TemplateCache {
    /// Compile every page found in `dir`.
    ///
    /// Each page is registered first, then all layouts, then all partials.
    /// The build is all-or-nothing: the first page that fails to compile
    /// fails the whole build.
    pub fn build(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let set = TemplateSet::discover(dir.as_ref())?;
        let mut pages = HashMap::with_capacity(set.pages.len());

        for page in &set.pages {
            let tera = compile_page(page, &set)?;
            pages.insert(page.name.clone(), tera);
        }

        Ok(Self { pages })
    }

    /// Render `page` with `data`, writing output to `out` as it is produced.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownPage` if the cache was not built with `page`
    /// - `Error::RenderFailed` if `data` cannot be turned into a template
    ///   context or the template fails while executing
    ///
    /// Data that does not serialize to a map is bound to [`DATA_KEY`].
    pub fn render<T, W>(&self, page: &str, data: &T, out: W) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let tera = self
            .pages
            .get(page)
            .ok_or_else(|| Error::UnknownPage(page.to_string()))?;

        let failed = |source| Error::RenderFailed { page: page.to_string(), source };
        let context = context_for(data).map_err(failed)?;
        tera.render_to(page, &context, out).map_err(failed)
    }

    /// Whether `page` was compiled into the cache.
    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    /// Names of all compiled pages, sorted.
    pub fn page_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn context_for<T: Serialize + ?Sized>(data: &T) -> tera::Result<Context> {
    let value = tera::to_value(data)?;
    if value.is_object() {
        return Context::from_value(value);
    }
    let mut context = Context::new();
    context.insert(DATA_KEY, &value);
    Ok(context)
}

fn compile_page(page: &TemplateSource, set: &TemplateSet) -> Result<Tera, Error> {
    let compile_err = |source| Error::TemplateCompile { page: page.name.clone(), source };

    let sources = std::iter::once(page)
        .chain(set.shared())
        .map(|s| (s.name.as_str(), s.body.as_str()));

    let mut tera = Tera::default();
    tera.add_raw_templates(sources).map_err(compile_err)?;

    check_orphan_blocks(&tera, &page.name)?;
    Ok(tera)
}

/// Tera silently drops a child block that no ancestor declares. Reject it so
/// a page never refers to a block its layouts do not provide.
///
/// Only top-level blocks of the page override anything; blocks nested inside
/// them are new declarations and are left alone.
fn check_orphan_blocks(tera: &Tera, page: &str) -> Result<(), Error> {
    let Some(template) = tera.templates.get(page) else {
        return Ok(());
    };
    if template.parents.is_empty() {
        return Ok(());
    }

    let declared: BTreeSet<&str> = template
        .parents
        .iter()
        .filter_map(|parent| tera.templates.get(parent))
        .flat_map(|parent| parent.blocks.keys().map(String::as_str))
        .collect();

    let orphan = template
        .ast
        .iter()
        .filter_map(|node| match node {
            Node::Block(_, block, _) => Some(block.name.as_str()),
            _ => None,
        })
        .find(|name| !declared.contains(name));

    match orphan {
        Some(block) => Err(Error::OrphanBlock { page: page.to_string(), block: block.to_string() }),
        None => Ok(()),
    }
}
