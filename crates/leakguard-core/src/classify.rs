//! Failure classification
//!
//! Maps the three failure origins (transport, HTTP status, business code)
//! into the single [`Error`] type, in the fixed priority order applied by
//! the executor. Classification is idempotent: an error that is already
//! classified passes through unchanged, so retries never double-wrap.

use crate::config::business_code;
use crate::error::Error;
use crate::transport::TransportError;

/// A failure awaiting classification
#[derive(Debug)]
pub enum Failure {
    /// No response was obtained from the transport
    Transport(TransportError),
    /// A response arrived with a non-success HTTP status
    Status(u16),
    /// HTTP succeeded but the envelope reported business failure
    Business { code: i64, message: String },
    /// Already went through classification
    Classified(Error),
}

/// Resolve a failure into the pipeline error type
pub fn classify(failure: Failure) -> Error {
    match failure {
        Failure::Transport(err) => classify_transport(err),
        Failure::Status(status) => Error::Http {
            status,
            message: http_status_message(status),
        },
        Failure::Business { code, message } => Error::Business {
            code,
            message: business_message(code, message),
        },
        Failure::Classified(err) => err,
    }
}

fn classify_transport(err: TransportError) -> Error {
    let message = match &err {
        TransportError::Timeout(_) => "request timed out, check your connection",
        TransportError::Unreachable(_) => "network unreachable, check your settings",
    };
    Error::Network {
        message: message.to_string(),
        source: Some(anyhow::Error::new(err)),
    }
}

/// Fixed status-to-text table for HTTP failures
fn http_status_message(status: u16) -> String {
    match status {
        400 => "invalid parameters".to_string(),
        401 => "unauthorized, please sign in".to_string(),
        403 => "access denied".to_string(),
        404 => "resource not found".to_string(),
        500 => "internal server error".to_string(),
        other => format!("HTTP error ({other})"),
    }
}

/// The two business codes with dedicated user-facing copy; every other code
/// keeps the server's own message
fn business_message(code: i64, server_message: String) -> String {
    match code {
        business_code::TOKEN_EXPIRED => "session expired, please sign in again".to_string(),
        business_code::PARAM_ERROR => "invalid parameters".to_string(),
        _ => {
            if server_message.is_empty() {
                "request failed".to_string()
            } else {
                server_message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_transport_timeout_classification() {
        let err = classify(Failure::Transport(TransportError::Timeout(
            "deadline exceeded".to_string(),
        )));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.code(), -1);
        assert_eq!(err.message(), "request timed out, check your connection");
    }

    #[test]
    fn test_transport_unreachable_classification() {
        let err = classify(Failure::Transport(TransportError::Unreachable(
            "connection refused".to_string(),
        )));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), "network unreachable, check your settings");
    }

    #[test]
    fn test_http_status_table() {
        let cases = [
            (400, "invalid parameters"),
            (401, "unauthorized, please sign in"),
            (403, "access denied"),
            (404, "resource not found"),
            (500, "internal server error"),
            (502, "HTTP error (502)"),
        ];
        for (status, expected) in cases {
            let err = classify(Failure::Status(status));
            assert_eq!(err.kind(), ErrorKind::Http);
            assert_eq!(err.code(), i64::from(status));
            assert_eq!(err.message(), expected, "status {status}");
        }
    }

    #[test]
    fn test_business_code_remaps() {
        let expired = classify(Failure::Business {
            code: business_code::TOKEN_EXPIRED,
            message: "token invalid".to_string(),
        });
        assert_eq!(expired.kind(), ErrorKind::Business);
        assert_eq!(expired.message(), "session expired, please sign in again");

        let param = classify(Failure::Business {
            code: business_code::PARAM_ERROR,
            message: "bad phone".to_string(),
        });
        assert_eq!(param.message(), "invalid parameters");
    }

    #[test]
    fn test_business_keeps_server_message_for_other_codes() {
        let err = classify(Failure::Business {
            code: 1005,
            message: "booking slot taken".to_string(),
        });
        assert_eq!(err.code(), 1005);
        assert_eq!(err.message(), "booking slot taken");
    }

    #[test]
    fn test_classification_is_idempotent() {
        let original = classify(Failure::Status(404));
        let reclassified = classify(Failure::Classified(original));

        assert_eq!(reclassified.kind(), ErrorKind::Http);
        assert_eq!(reclassified.code(), 404);
        assert_eq!(reclassified.message(), "resource not found");
    }
}
