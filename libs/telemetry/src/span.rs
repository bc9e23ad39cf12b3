use crate::context::GenerationLabels;
use crate::metrics::record_counter;

const GENERATED_COUNTER: &str = "activities_generated";
const FAILED_COUNTER: &str = "activity_generation_failed";

/// Runs `f` inside an `activity.generate` span and counts the outcome.
pub fn with_generation_span<T, E, F>(labels: &GenerationLabels, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Display,
{
    let span = tracing::info_span!(
        "activity.generate",
        template_id = %labels.template_id,
        kind = labels.kind.as_deref().unwrap_or("unknown"),
    );
    let _guard = span.enter();
    let result = f();
    match &result {
        Ok(_) => record_counter(GENERATED_COUNTER, 1, labels),
        Err(err) => {
            tracing::debug!(error = %err, "activity generation failed");
            record_counter(FAILED_COUNTER, 1, labels);
        }
    }
    result
}
