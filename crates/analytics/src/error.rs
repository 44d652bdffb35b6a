use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Malformed {field} value '{value}': not a finite decimal number")]
    MalformedNumber { field: &'static str, value: String },
}
