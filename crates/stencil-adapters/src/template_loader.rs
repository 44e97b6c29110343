//! Filesystem-based template loader.
//!
//! Discovers `*.tmpl` files under a directory tree and parses all of them into
//! one [`MiniJinjaTemplateSet`], so that any template can include any other.
//!
//! # Naming
//!
//! A template is named by its path relative to the deepest directory that
//! contains every supplied template:
//!
//! ```text
//! templates/
//! ├── content.tmpl             → "content.tmpl"
//! ├── import.tmpl              → "import.tmpl"
//! └── partials/
//!     └── partial.tmpl         → "partials/partial.tmpl"
//! ```
//!
//! `import.tmpl` reaches its partial with `{% include "partials/partial.tmpl" %}`.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::TemplateSet},
    domain::TemplateName,
    error::{StencilError, StencilResult},
};

use crate::renderer::MiniJinjaTemplateSet;

/// File extension of template files picked up by discovery.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads every template found under a directory.
///
/// # Example
///
/// ```no_run
/// use stencil_adapters::template_loader::TemplateDirLoader;
///
/// let loader = TemplateDirLoader::new("./templates");
/// let templates = loader.load()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), stencil_core::error::StencilError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TemplateDirLoader {
    templates_dir: PathBuf,
}

impl TemplateDirLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist yet; [`load`](Self::load) will
    /// return an error if it is missing when called.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.templates_dir
    }

    /// List template files under the directory in load order.
    pub fn discover(&self) -> StencilResult<Vec<PathBuf>> {
        if !self.templates_dir.is_dir() {
            return Err(ApplicationError::Io {
                path: self.templates_dir.clone(),
                reason: "templates directory not found".into(),
            }
            .into());
        }
        discover_template_files(&self.templates_dir)
    }

    /// Discover and load every template under the directory.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Io`] if the directory is missing or unreadable.
    /// - [`StencilError::Configuration`] if it holds no templates.
    /// - Any error of [`load_templates`].
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load(&self) -> StencilResult<MiniJinjaTemplateSet> {
        let paths = self.discover()?;
        debug!(count = paths.len(), "discovered template files");
        load_templates(&paths)
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Recursively collect `*.tmpl` files under `root`.
///
/// Entries are visited depth-first, sorted by file name within each
/// directory, so the result is deterministic. Symbolic links are followed;
/// a link to a `*.tmpl` file is loaded under the link's own name.
///
/// # Errors
///
/// Returns [`ApplicationError::Io`] on the first walk failure, including a
/// broken link or a link cycle.
pub fn discover_template_files(root: impl AsRef<Path>) -> StencilResult<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| ApplicationError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: format!("directory walk error: {e}"),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parse every file in `paths` into one template namespace.
///
/// Loading stops at the first failure; no partial set is returned. A path
/// given twice keeps the later definition.
///
/// # Errors
///
/// - [`StencilError::Configuration`] if `paths` is empty.
/// - [`ApplicationError::Path`] if a path cannot be named relative to the
///   common base directory.
/// - [`ApplicationError::Io`] if a file cannot be read.
/// - [`ApplicationError::Parse`] if a template body is malformed.
#[instrument(skip_all, fields(count = paths.len()))]
pub fn load_templates<P: AsRef<Path>>(paths: &[P]) -> StencilResult<MiniJinjaTemplateSet> {
    let paths: Vec<&Path> = paths.iter().map(AsRef::as_ref).collect();

    let Some(first) = paths.first() else {
        return Err(StencilError::configuration(
            "at least one template path is required",
        ));
    };

    let base = common_base(&paths).ok_or_else(|| ApplicationError::Path {
        path: first.to_path_buf(),
        base: PathBuf::new(),
        reason: "template paths share no common base directory".into(),
    })?;
    debug!(base = %base.display(), "resolved template base directory");

    let mut set = MiniJinjaTemplateSet::new();

    for path in paths {
        let name = template_name(&base, path)?;

        let bytes = fs::read(path).map_err(|e| ApplicationError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let source = String::from_utf8_lossy(&bytes).into_owned();

        insert_template(&mut set, name, source, path)?;
    }

    debug!(count = set.len(), "finished loading templates");
    Ok(set)
}

/// Add `source` under `name`. A later definition replaces an earlier one.
fn insert_template(
    set: &mut MiniJinjaTemplateSet,
    name: TemplateName,
    source: String,
    path: &Path,
) -> StencilResult<()> {
    if set.contains(name.as_str()) {
        warn!(
            template = %name,
            path = %path.display(),
            "duplicate template name, replacing earlier definition"
        );
    }

    set.add_template(name.clone(), source)?;
    debug!(template = %name, path = %path.display(), "loaded template");
    Ok(())
}

fn template_name(base: &Path, path: &Path) -> StencilResult<TemplateName> {
    let path_error = |reason: String| ApplicationError::Path {
        path: path.to_path_buf(),
        base: base.to_path_buf(),
        reason,
    };

    let relative = path
        .strip_prefix(base)
        .map_err(|_| path_error("path is outside the base directory".into()))?;

    TemplateName::from_relative_path(relative)
        .map_err(|e| path_error(e.to_string()).into())
}

/// Deepest directory containing the parent directory of every path.
///
/// Returns `None` when the paths have no common root, e.g. when absolute and
/// relative paths are mixed.
pub fn common_base<P: AsRef<Path>>(paths: &[P]) -> Option<PathBuf> {
    let mut iter = paths.iter().map(|p| parent_of(p.as_ref()));
    let first = iter.next()?;
    let mut base: Vec<Component<'_>> = first.components().collect();

    for parent in iter {
        let shared = base
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| *a == b)
            .count();
        base.truncate(shared);

        if base.is_empty() && parent.is_absolute() != first.is_absolute() {
            return None;
        }
    }

    if base.is_empty() && first.has_root() {
        return None;
    }

    Some(base.iter().collect())
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new(""))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::RenderData;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, body: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    fn names(set: &MiniJinjaTemplateSet) -> Vec<String> {
        set.names().into_iter().map(TemplateName::into_string).collect()
    }

    fn sep(rel: &str) -> String {
        rel.replace('/', std::path::MAIN_SEPARATOR_STR)
    }

    #[test]
    fn common_base_of_siblings_is_their_parent() {
        let base = common_base(&["t/a.tmpl", "t/b.tmpl"]).unwrap();
        assert_eq!(base, PathBuf::from("t"));
    }

    #[test]
    fn common_base_spans_mixed_depths() {
        let base = common_base(&["t/x/a.tmpl", "t/b.tmpl", "t/y/z/c.tmpl"]).unwrap();
        assert_eq!(base, PathBuf::from("t"));
    }

    #[test]
    fn common_base_of_nested_only_paths() {
        let base = common_base(&["t/x/a.tmpl", "t/y/b.tmpl"]).unwrap();
        assert_eq!(base, PathBuf::from("t"));
    }

    #[test]
    fn common_base_of_bare_file_names_is_empty() {
        let base = common_base(&["a.tmpl", "b.tmpl"]).unwrap();
        assert_eq!(base, PathBuf::new());
    }

    #[test]
    fn common_base_rejects_mixed_absolute_and_relative() {
        assert!(common_base(&["/t/a.tmpl", "t/b.tmpl"]).is_none());
        assert!(common_base(&["t/a.tmpl", "/t/b.tmpl"]).is_none());
    }

    #[test]
    fn common_base_of_unrelated_absolute_paths_is_root() {
        let base = common_base(&["/a/x.tmpl", "/b/y.tmpl"]).unwrap();
        assert_eq!(base, PathBuf::from("/"));
    }

    #[test]
    fn common_base_of_nothing_is_none() {
        assert!(common_base::<&str>(&[]).is_none());
    }

    #[test]
    fn empty_path_list_is_a_configuration_error() {
        let err = load_templates::<&str>(&[]).unwrap_err();
        assert!(matches!(err, StencilError::Configuration { .. }));
        assert!(err.to_string().contains("at least one template path is required"));
    }

    #[test]
    fn names_are_relative_to_common_base() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "x/a.tmpl", "A");
        let b = write(tmp.path(), "y/z/b.tmpl", "B");

        let set = load_templates(&[a, b]).unwrap();
        assert_eq!(names(&set), vec![sep("x/a.tmpl"), sep("y/z/b.tmpl")]);
    }

    #[test]
    fn nested_templates_include_each_other_by_name() {
        let tmp = TempDir::new().unwrap();
        let outer = write(
            tmp.path(),
            "outer.tmpl",
            "[{% include \"inner/inner.tmpl\" %}]",
        );
        let inner = write(tmp.path(), "inner/inner.tmpl", "in");

        let set = load_templates(&[outer, inner]).unwrap();
        let out = set.render("outer.tmpl", &RenderData::new(b"")).unwrap();
        assert_eq!(out, "[in]");
    }

    #[test]
    fn duplicate_path_loads_once() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.tmpl", "first");

        let set = load_templates(&[a.clone(), a]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.render("a.tmpl", &RenderData::new(b"")).unwrap(), "first");
    }

    #[test]
    fn later_definition_of_a_name_wins() {
        let name = TemplateName::from_relative_path(Path::new("a.tmpl")).unwrap();
        let mut set = MiniJinjaTemplateSet::new();

        insert_template(&mut set, name.clone(), "first".into(), Path::new("x/a.tmpl")).unwrap();
        insert_template(&mut set, name, "second".into(), Path::new("y/a.tmpl")).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.render("a.tmpl", &RenderData::new(b"")).unwrap(), "second");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.tmpl");

        let err = load_templates(&[missing.clone()]).unwrap_err();
        match err {
            StencilError::Application(ApplicationError::Io { path, .. }) => {
                assert_eq!(path, missing)
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_names_template_and_line() {
        let tmp = TempDir::new().unwrap();
        let good = write(tmp.path(), "good.tmpl", "ok");
        let bad = write(tmp.path(), "bad.tmpl", "line one\n{{ unclosed\n");

        let err = load_templates(&[good, bad]).unwrap_err();
        match err {
            StencilError::Application(ApplicationError::Parse { name, line, .. }) => {
                assert_eq!(name, "bad.tmpl");
                assert!(line.is_some());
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bin.tmpl");
        fs::write(&path, [b'a', 0xff, b'b']).unwrap();

        let set = load_templates(&[path]).unwrap();
        let out = set.render("bin.tmpl", &RenderData::new(b"")).unwrap();
        assert_eq!(out, "a\u{fffd}b");
    }

    #[test]
    fn discovery_filters_by_extension_and_sorts() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.tmpl", "");
        write(tmp.path(), "a.tmpl", "");
        write(tmp.path(), "notes.txt", "");
        write(tmp.path(), "sub/c.tmpl", "");

        let found: Vec<PathBuf> = discover_template_files(tmp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from("a.tmpl"),
                PathBuf::from("b.tmpl"),
                PathBuf::from("sub").join("c.tmpl"),
            ]
        );
    }

    #[test]
    fn discovery_of_empty_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_template_files(tmp.path()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn discovery_follows_symlinked_templates() {
        let tmp = TempDir::new().unwrap();
        let shared = write(tmp.path(), "shared/base.tmpl", "<{{ Content }}>");
        let templates = tmp.path().join("templates");
        write(&templates, "page.tmpl", "");
        std::os::unix::fs::symlink(&shared, templates.join("linked.tmpl")).unwrap();

        let found = discover_template_files(&templates).unwrap();
        assert_eq!(
            found,
            vec![templates.join("linked.tmpl"), templates.join("page.tmpl")]
        );

        let set = TemplateDirLoader::new(&templates).load().unwrap();
        let out = set.render("linked.tmpl", &RenderData::new(b"x")).unwrap();
        assert_eq!(out, "<x>");
    }

    #[test]
    fn loader_reports_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let loader = TemplateDirLoader::new(tmp.path().join("nope"));

        let err = loader.load().unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::Io { .. })
        ));
    }

    #[test]
    fn loader_on_empty_directory_is_a_configuration_error() {
        let tmp = TempDir::new().unwrap();
        let err = TemplateDirLoader::new(tmp.path()).load().unwrap_err();
        assert!(matches!(err, StencilError::Configuration { .. }));
    }

    #[test]
    fn loader_names_against_directory_root() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "page.tmpl", "");
        write(tmp.path(), "partials/p.tmpl", "");

        let loader = TemplateDirLoader::new(tmp.path());
        assert_eq!(loader.dir(), tmp.path());

        let set = loader.load().unwrap();
        assert_eq!(names(&set), vec![sep("page.tmpl"), sep("partials/p.tmpl")]);
    }
}
