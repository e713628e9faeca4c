/*!
 * Tests for error types and conversions
 */

use std::io;

use termlock::errors::{AppError, ProviderError, TerminologyError, TranslationError};

#[test]
fn test_providerError_display() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 429 - Too many requests");

    let error = ProviderError::RateLimitExceeded("retry later".to_string());
    assert_eq!(error.to_string(), "Rate limit exceeded: retry later");
}

#[test]
fn test_translationError_fromProviderError_shouldWrap() {
    let error: TranslationError = ProviderError::ConnectionError("refused".to_string()).into();

    assert!(matches!(error, TranslationError::Provider(ProviderError::ConnectionError(_))));
    assert_eq!(error.to_string(), "Provider error: Connection error: refused");
}

#[test]
fn test_translationError_timeout_display() {
    assert_eq!(
        TranslationError::Timeout(30).to_string(),
        "Translation timed out after 30 seconds"
    );
}

#[test]
fn test_terminologyError_fromIo_shouldWrap() {
    let error: TerminologyError = io::Error::new(io::ErrorKind::NotFound, "gone").into();

    assert!(matches!(error, TerminologyError::Io(_)));
    assert_eq!(error.to_string(), "Failed to read terminology file: gone");
}

#[test]
fn test_terminologyError_missingColumns_display() {
    assert_eq!(
        TerminologyError::MissingColumns(1).to_string(),
        "Terminology data needs at least 2 columns, found 1"
    );
}

#[test]
fn test_appError_conversions() {
    let error: AppError = TranslationError::Timeout(5).into();
    assert!(matches!(error, AppError::Translation(TranslationError::Timeout(5))));

    let error: AppError = TerminologyError::MissingColumns(0).into();
    assert!(matches!(error, AppError::Terminology(_)));

    let error: AppError = io::Error::other("disk full").into();
    assert!(matches!(error, AppError::File(ref message) if message == "disk full"));

    let error: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(error.to_string(), "Unknown error: something odd");
}
