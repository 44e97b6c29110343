//! Render options.
//!
//! [`RenderOptions`] is fixed when a renderer is built and never changes
//! afterwards. `Default` is a pure factory; there is no global instance.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context key holding the template name unless configured otherwise.
pub const DEFAULT_TEMPLATE_KEYWORD: &str = "template";

/// Context key holding a file's front matter.
pub const FRONT_MATTER_KEY: &str = "frontmatter";

/// Options controlling how files select and feed their templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Context key whose value names the template to render.
    pub template_keyword: String,

    /// Pass files through untouched when the template keyword holds a
    /// non-string value, instead of failing.
    pub ignore_template_errors: bool,

    /// Expose the file's front matter to its template as `frontmatter`.
    pub include_front_matter: bool,

    /// Caller supplied data, exposed to every template as `data`.
    pub data: Option<Value>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template_keyword: DEFAULT_TEMPLATE_KEYWORD.into(),
            ignore_template_errors: false,
            include_front_matter: true,
            data: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.template_keyword = keyword.into();
        self
    }

    pub fn ignore_template_errors(mut self, ignore: bool) -> Self {
        self.ignore_template_errors = ignore;
        self
    }

    pub fn include_front_matter(mut self, include: bool) -> Self {
        self.include_front_matter = include;
        self
    }

    pub fn data(mut self, data: impl Into<Value>) -> Self {
        let data = data.into();
        self.data = (!data.is_null()).then_some(data);
        self
    }
}
