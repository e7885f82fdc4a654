#[derive(Debug, thiserror::Error)]
pub enum WebviewError {
    #[error("webview already exists: {0}")]
    AlreadyExists(String),

    #[error("webview not found: {0}")]
    NotFound(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("host screen unavailable")]
    NoHostSurface,

    #[error("message serialization failed: {0}")]
    Serialization(String),

    #[error("script execution failed: {0}")]
    ScriptExecution(String),

    #[error("navigation failed: {0}")]
    Navigation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webview_error_display() {
        let err = WebviewError::AlreadyExists("main".into());
        assert_eq!(err.to_string(), "webview already exists: main");

        let err = WebviewError::NotFound("ads".into());
        assert_eq!(err.to_string(), "webview not found: ads");

        let err = WebviewError::InvalidUrl("not a url".into());
        assert_eq!(err.to_string(), "invalid url: not a url");

        let err = WebviewError::NoHostSurface;
        assert_eq!(err.to_string(), "host screen unavailable");
    }

    #[test]
    fn engine_errors_carry_engine_message() {
        let err = WebviewError::ScriptExecution("ReferenceError: x is not defined".into());
        assert_eq!(
            err.to_string(),
            "script execution failed: ReferenceError: x is not defined"
        );

        let err = WebviewError::Navigation("net::ERR_NAME_NOT_RESOLVED".into());
        assert_eq!(err.to_string(), "navigation failed: net::ERR_NAME_NOT_RESOLVED");

        let err = WebviewError::Serialization("key must be a string".into());
        assert_eq!(
            err.to_string(),
            "message serialization failed: key must be a string"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("event_capacity must be nonzero".into());
        assert_eq!(
            err.to_string(),
            "config validation error: event_capacity must be nonzero"
        );
    }
}
