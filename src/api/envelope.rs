//! The `{success, data | error}` envelope every catalog call returns

use serde::Deserialize;

/// Outcome of a catalog API call
///
/// Exactly one of data or error exists, so the wire triple collapses into
/// an enum. Pages treat `Failure` as the only failure signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(String),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// Error message, if this is a failure
    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(message) => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Envelope::Success(data) => Envelope::Success(f(data)),
            Envelope::Failure(message) => Envelope::Failure(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(message) => Err(message),
        }
    }
}

impl<T> From<Result<T, String>> for Envelope<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => Envelope::Success(data),
            Err(message) => Envelope::Failure(message),
        }
    }
}

/// Envelope as the catalog service writes it
#[derive(Debug, Deserialize)]
pub(crate) struct WireEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> WireEnvelope<T> {
    /// Server-provided failure text, preferring `error` over `message`
    pub fn failure_text(&mut self) -> Option<String> {
        self.error.take().or_else(|| self.message.take())
    }

    pub fn into_envelope(mut self, missing: &str) -> Envelope<T> {
        if !self.success {
            let message = self
                .failure_text()
                .unwrap_or_else(|| "request failed".to_string());
            return Envelope::Failure(message);
        }
        match self.data {
            Some(data) => Envelope::Success(data),
            None => Envelope::Failure(missing.to_string()),
        }
    }
}

/// Response body: either a wrapped envelope or the bare payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Body<T> {
    Wrapped(WireEnvelope<T>),
    Bare(T),
}

impl<T> Body<T> {
    pub fn into_envelope(self, missing: &str) -> Envelope<T> {
        match self {
            Body::Wrapped(wire) => wire.into_envelope(missing),
            Body::Bare(data) => Envelope::Success(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data() {
        let body: Body<Vec<u32>> = serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(body.into_envelope("missing"), Envelope::Success(vec![1, 2]));
    }

    #[test]
    fn failure_prefers_error_then_message() {
        let body: Body<u32> =
            serde_json::from_str(r#"{"success": false, "error": "not found", "message": "x"}"#).unwrap();
        assert_eq!(body.into_envelope("missing"), Envelope::Failure("not found".into()));

        let body: Body<u32> = serde_json::from_str(r#"{"success": false, "message": "boom"}"#).unwrap();
        assert_eq!(body.into_envelope("missing"), Envelope::Failure("boom".into()));

        let body: Body<u32> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(body.into_envelope("missing"), Envelope::Failure("request failed".into()));
    }

    #[test]
    fn success_without_data_is_a_failure() {
        let body: Body<u32> = serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert_eq!(body.into_envelope("not found"), Envelope::Failure("not found".into()));
    }

    #[test]
    fn bare_payload_is_success() {
        let body: Body<Vec<String>> = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(
            body.into_envelope("missing"),
            Envelope::Success(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn helpers() {
        let ok: Envelope<u32> = Ok(3).into();
        assert!(ok.is_success());
        assert_eq!(ok.error(), None);
        assert_eq!(ok.map(|v| v * 2).into_result(), Ok(6));

        let failed: Envelope<u32> = Err("offline".to_string()).into();
        assert_eq!(failed.error(), Some("offline"));
        assert_eq!(failed.into_result(), Err("offline".to_string()));
    }
}
