use std::sync::Mutex;
use crate::core::library::ShelfError;

// DiagnosticSink receives failures from persistence operations. Reports are
// fire-and-forget: nothing waits on them and nothing checks delivery.
pub trait DiagnosticSink: Sync + Send {
    fn report(&self, context: &str, err: &ShelfError);
}

// TracingSink forwards reports to the tracing subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, context: &str, err: &ShelfError) {
        tracing::error!(error = %err, retryable = err.retryable(), "{}", context);
    }
}

// RecordingSink keeps every report in memory so callers can inspect what was logged.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<(String, ShelfError)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, ShelfError)> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, context: &str, err: &ShelfError) {
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push((context.to_string(), err.clone()));
    }
}

#[cfg(test)]
mod tests {
    use crate::core::diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
    use crate::core::library::ShelfError;

    #[tokio::test]
    async fn test_should_record_reports() {
        let sink = RecordingSink::new();
        sink.report("Error saving book:", &ShelfError::not_found("missing"));
        sink.report("Error deleting book:", &ShelfError::missing_identifier());
        let reports = sink.reports();
        assert_eq!(2, reports.len());
        assert_eq!("Error saving book:", reports[0].0.as_str());
        assert!(matches!(reports[1].1, ShelfError::MissingIdentifier { .. }));
    }

    #[tokio::test]
    async fn test_should_report_to_tracing_without_subscriber() {
        TracingSink.report("Error saving book:", &ShelfError::runtime("test", None));
    }
}
