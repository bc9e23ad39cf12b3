/// Labels attached to generation spans and counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationLabels {
    pub template_id: String,
    pub kind: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl GenerationLabels {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            kind: None,
            extra: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(2 + self.extra.len());
        tags.push(("template_id".into(), self.template_id.clone()));
        if let Some(kind) = &self.kind {
            tags.push(("kind".into(), kind.clone()));
        }
        for (key, value) in &self.extra {
            tags.push((key.clone(), value.clone()));
        }
        tags
    }
}
