//! Template evaluation seam. The generator only needs `evaluate(id, scope) -> String`; the
//! Handlebars-backed store is the default implementation.

use std::sync::Arc;

use serde_json::Value;

use crate::error::EvaluateError;

pub trait TemplateEvaluator {
    fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, EvaluateError>;
}

impl<T: TemplateEvaluator + ?Sized> TemplateEvaluator for &T {
    fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, EvaluateError> {
        (**self).evaluate(template_id, scope)
    }
}

impl<T: TemplateEvaluator + ?Sized> TemplateEvaluator for Box<T> {
    fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, EvaluateError> {
        (**self).evaluate(template_id, scope)
    }
}

impl<T: TemplateEvaluator + ?Sized> TemplateEvaluator for Arc<T> {
    fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, EvaluateError> {
        (**self).evaluate(template_id, scope)
    }
}

#[cfg(feature = "handlebars")]
pub use self::hbs::HandlebarsEvaluator;

#[cfg(feature = "handlebars")]
mod hbs {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;

    use handlebars::Handlebars;
    use serde::Deserialize;
    use serde_json::Value;

    use super::TemplateEvaluator;
    use crate::error::EvaluateError;

    #[derive(Debug, Deserialize)]
    struct TemplateStoreDoc {
        templates: BTreeMap<String, String>,
    }

    /// Template store backed by a strict Handlebars registry. Output is not HTML-escaped.
    #[derive(Debug, Clone)]
    pub struct HandlebarsEvaluator {
        registry: Handlebars<'static>,
    }

    impl Default for HandlebarsEvaluator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HandlebarsEvaluator {
        pub fn new() -> Self {
            let mut registry = Handlebars::new();
            registry.set_strict_mode(true);
            registry.register_escape_fn(handlebars::no_escape);
            Self { registry }
        }

        pub fn register(&mut self, template_id: &str, source: &str) -> Result<(), EvaluateError> {
            if template_id.trim().is_empty() {
                return Err(EvaluateError::Store("template id must not be blank".into()));
            }
            self.registry
                .register_template_string(template_id, source)
                .map_err(EvaluateError::engine)
        }

        pub fn with_template(mut self, template_id: &str, source: &str) -> Result<Self, EvaluateError> {
            self.register(template_id, source)?;
            Ok(self)
        }

        /// Loads a `templates: { id: source }` YAML document.
        pub fn from_yaml_str(yaml: &str) -> Result<Self, EvaluateError> {
            let doc: TemplateStoreDoc = serde_yaml_bw::from_str(yaml)
                .map_err(|err| EvaluateError::Store(format!("parsing template store: {err}")))?;
            if doc.templates.is_empty() {
                return Err(EvaluateError::Store("template store defines no templates".into()));
            }
            let mut evaluator = Self::new();
            for (id, source) in &doc.templates {
                evaluator.register(id, source)?;
            }
            tracing::debug!(count = doc.templates.len(), "loaded template store");
            Ok(evaluator)
        }

        pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, EvaluateError> {
            let path = path.as_ref();
            let yaml = fs::read_to_string(path).map_err(|err| {
                EvaluateError::Store(format!("reading template store at {}: {err}", path.display()))
            })?;
            Self::from_yaml_str(&yaml)
        }

        pub fn has_template(&self, template_id: &str) -> bool {
            self.registry.has_template(template_id)
        }

        pub fn template_ids(&self) -> Vec<String> {
            let mut ids: Vec<String> = self.registry.get_templates().keys().cloned().collect();
            ids.sort();
            ids
        }
    }

    impl TemplateEvaluator for HandlebarsEvaluator {
        fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, EvaluateError> {
            if !self.registry.has_template(template_id) {
                return Err(EvaluateError::NotFound(template_id.to_string()));
            }
            self.registry
                .render(template_id, scope)
                .map_err(EvaluateError::engine)
        }
    }

}
