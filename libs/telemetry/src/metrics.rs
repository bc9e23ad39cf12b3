use crate::context::GenerationLabels;

/// Increments a counter on the installed `metrics` recorder, if any.
pub fn record_counter(name: &'static str, value: u64, labels: &GenerationLabels) {
    let tags = labels.tags();
    metrics::counter!(name, &tags).increment(value);
}
