//! MiniJinja-backed template namespace.
//!
//! All templates live in one [`Environment`], so a template can include any
//! other by the name it was registered under:
//!
//! ```jinja
//! <div>Import {% include "partials/partial.tmpl" %}</div>
//! ```
//!
//! Templates are text templates: auto-escaping is off and a body's trailing
//! newline is kept. Missing fields render empty, even through a chain such
//! as `frontmatter.Bar` when a file has no front matter.

use std::collections::BTreeSet;

use minijinja::{AutoEscape, Environment, Error, UndefinedBehavior};
use tracing::trace;

use stencil_core::{
    application::{ApplicationError, ports::TemplateSet},
    domain::{RenderData, TemplateName},
    error::StencilResult,
};

/// A loaded, immutable set of mutually referenceable templates.
#[derive(Debug)]
pub struct MiniJinjaTemplateSet {
    env: Environment<'static>,
    names: BTreeSet<TemplateName>,
}

impl MiniJinjaTemplateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Chainable);

        Self {
            env,
            names: BTreeSet::new(),
        }
    }

    /// Parse `source` and register it under `name`.
    ///
    /// Registering an existing name replaces the earlier template.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Parse`] with the template name and line of
    /// the syntax error.
    pub fn add_template(&mut self, name: TemplateName, source: String) -> StencilResult<()> {
        self.env
            .add_template_owned(name.as_str().to_owned(), source)
            .map_err(|e| parse_error(&name, &e))?;

        trace!(template = %name, "registered template");
        self.names.insert(name);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MiniJinjaTemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSet for MiniJinjaTemplateSet {
    fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    fn names(&self) -> Vec<TemplateName> {
        self.names.iter().cloned().collect()
    }

    fn render(&self, name: &str, data: &RenderData) -> StencilResult<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| execution_error(name, &e))?;

        template
            .render(data)
            .map_err(|e| execution_error(name, &e).into())
    }
}

fn parse_error(name: &TemplateName, e: &Error) -> ApplicationError {
    // Name and line are carried as fields, so only kind and detail go in the reason.
    let reason = match e.detail() {
        Some(detail) => format!("{}: {detail}", e.kind()),
        None => e.kind().to_string(),
    };
    ApplicationError::Parse {
        name: name.to_string(),
        line: e.line(),
        reason,
    }
}

fn execution_error(name: &str, e: &Error) -> ApplicationError {
    ApplicationError::TemplateExecution {
        template: name.to_owned(),
        reason: e.to_string(),
    }
}
