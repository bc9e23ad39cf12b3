use std::collections::HashMap;
use std::sync::Mutex;

use lg_core::{EvaluateError, TemplateEvaluator};
use serde_json::Value;

/// Evaluator returning fixed output per template id, ignoring the scope.
#[derive(Debug, Clone, Default)]
pub struct StaticEvaluator {
    outputs: HashMap<String, String>,
}

impl StaticEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, template_id: &str, output: &str) -> Self {
        self.outputs
            .insert(template_id.to_string(), output.to_string());
        self
    }
}

impl TemplateEvaluator for StaticEvaluator {
    fn evaluate(&self, template_id: &str, _scope: &Value) -> Result<String, EvaluateError> {
        self.outputs
            .get(template_id)
            .cloned()
            .ok_or_else(|| EvaluateError::NotFound(template_id.to_string()))
    }
}

/// Wraps another evaluator and records every template id it is asked for, in call order.
#[derive(Debug, Default)]
pub struct RecordingEvaluator<E> {
    inner: E,
    calls: Mutex<Vec<String>>,
}

impl<E> RecordingEvaluator<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl<E: TemplateEvaluator> TemplateEvaluator for RecordingEvaluator<E> {
    fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, EvaluateError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(template_id.to_string());
        }
        self.inner.evaluate(template_id, scope)
    }
}
