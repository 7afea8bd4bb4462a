//! Template engine for scaffold file generation.
//!
//! All scaffold output is rendered from named Handlebars templates with a
//! key-value context (the widget spec). Templates are embedded at compile
//! time from `templates/` next to the crate manifest; names mirror their
//! path there, without the `.hbs` suffix. The `common/` set is emitted for
//! every project, while `badge/` and `empty/` hold the per-boilerplate
//! widget sources.

use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::WidgenError;

macro_rules! embedded {
    ($name:literal) => {
        ($name, include_str!(concat!("../../templates/", $name, ".hbs")))
    };
}

/// Registered template names and their embedded sources.
const TEMPLATES: &[(&str, &str)] = &[
    embedded!("common/package.json"),
    embedded!("common/package.xml"),
    embedded!("common/webpack.config.js"),
    embedded!("common/babelrc"),
    embedded!("common/gitignore"),
    embedded!("common/gitattributes"),
    embedded!("common/tslint.json"),
    embedded!("common/tsconfig.json"),
    embedded!("common/karma.conf.js"),
    embedded!("common/Gruntfile.js"),
    embedded!("common/Gulpfile.js"),
    embedded!("badge/README.md"),
    embedded!("badge/widget.xml"),
    embedded!("badge/webmodeler.ts"),
    embedded!("badge/widget.css"),
    embedded!("badge/component.ts"),
    embedded!("badge/container.ts"),
    embedded!("badge/component.spec.ts"),
    embedded!("badge/e2e.spec.ts"),
    embedded!("badge/home.page.ts"),
    embedded!("badge/wdio.conf.js"),
    embedded!("empty/README.md"),
    embedded!("empty/widget.xml"),
    embedded!("empty/webmodeler.ts"),
    embedded!("empty/widget.css"),
    embedded!("empty/component.ts"),
    embedded!("empty/container.ts"),
    embedded!("empty/component.spec.ts"),
];

/// The widget XSD schema, copied into scaffolds verbatim.
pub const WIDGET_XSD: &str = include_str!("../../templates/common/widget.xsd");

/// Renders named templates against a serializable context.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Creates an engine with every embedded template registered.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to compile; that is
    /// a packaging defect, not a runtime condition.
    pub fn new() -> Result<Self, WidgenError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| WidgenError::template_render(*name, e.to_string()))?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`WidgenError::TemplateRender`] for unknown names or render
    /// failures.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, WidgenError> {
        self.handlebars
            .render(name, data)
            .map_err(|e| WidgenError::template_render(name, e.to_string()))
    }
}
