//! Render Service - the single-shot render step.
//!
//! Given one file and its complete content, select the file's template from
//! its context and execute it:
//! 1. No template selected → pass through
//! 2. Template keyword holds a non-string → fail, or pass through when
//!    `ignore_template_errors` is set
//! 3. Build render data (content, front matter, user data)
//! 4. Execute; on failure hand back the original content with the error

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::{StreamFailure, TemplateSet},
    domain::{FileInfo, RenderData, RenderOptions},
};

/// Renders whole files through a loaded [`TemplateSet`].
pub struct StreamRenderer<T> {
    options: RenderOptions,
    templates: T,
}

impl<T: TemplateSet> StreamRenderer<T> {
    /// Create a renderer over an already loaded template set.
    pub fn new(templates: T, options: RenderOptions) -> Self {
        Self { options, templates }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn templates(&self) -> &T {
        &self.templates
    }

    /// Render `chunk` (the file's complete content) with the template the
    /// file's context selects.
    ///
    /// # Errors
    ///
    /// - Type mismatch on the template keyword: the failure carries neither
    ///   file nor content.
    /// - Execution failure: the failure carries the file and the original,
    ///   unrendered `chunk`.
    #[instrument(skip_all, fields(file = %file.id().display(), bytes = chunk.len()))]
    pub fn render(
        &self,
        file: FileInfo,
        chunk: Vec<u8>,
    ) -> Result<(FileInfo, Vec<u8>), StreamFailure> {
        let keyword = self.options.template_keyword.as_str();

        let selected = file
            .ctx
            .template_name(keyword)
            .map(|name| name.map(str::to_owned));

        let template = match selected {
            Ok(Some(name)) => name,
            Ok(None) => {
                debug!(keyword, "no template selected, passing through");
                return Ok((file, chunk));
            }
            Err(e) if self.options.ignore_template_errors => {
                warn!(error = %e, "ignoring template selection error, passing through");
                return Ok((file, chunk));
            }
            Err(e) => return Err(StreamFailure::bare(e)),
        };

        let front_matter = if self.options.include_front_matter {
            file.ctx.front_matter().cloned()
        } else {
            None
        };

        let data = RenderData::new(&chunk)
            .front_matter(front_matter)
            .user_data(self.options.data.clone());

        match self.templates.render(&template, &data) {
            Ok(rendered) => {
                debug!(template = %template, out_bytes = rendered.len(), "rendered file");
                Ok((file, rendered.into_bytes()))
            }
            Err(e) => {
                warn!(template = %template, error = %e, "template execution failed");
                Err(StreamFailure::preserving(file, chunk, e))
            }
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
