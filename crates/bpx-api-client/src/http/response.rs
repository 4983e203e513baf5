/*
[INPUT]:  HTTP status codes, decoded response bodies, captured failures
[OUTPUT]: Uniform ApiResponse<T> envelope returned by every REST call
[POS]:    HTTP layer - success/error normalization shared by all resource groups
[UPDATE]: When the envelope shape or error defaults change
*/

use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Error half of the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error taken from an exchange error body, falling back to the generic defaults
    pub fn from_body(body: &Value) -> Self {
        Self {
            code: body_field(body, "code").unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string()),
            message: body_field(body, "message")
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Uniform result of every REST call.
///
/// Serializes as `{"statusCode": n, "data": T | {}, "error": {} | {"code", "message"}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn success(status_code: u16, data: T) -> Self {
        Self {
            status_code,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(status_code: u16, error: ApiError) -> Self {
        Self {
            status_code,
            data: None,
            error: Some(error),
        }
    }

    /// Transport-level failure: no response was received
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::failure(500, ApiError::new(UNKNOWN_ERROR_CODE, message))
    }

    /// True only for status 200; 201, 204 and every other code count as failure.
    ///
    /// This looks at the status alone. A 200 body that does not decode into `T` keeps
    /// `status_code == 200` with `data: None` and a `DECODE_ERROR` error, so callers that
    /// need the payload should go through [`ApiResponse::into_result`].
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Convert into a `Result`, keeping the status code on the error side.
    ///
    /// `Ok` requires both status 200 and decoded data.
    pub fn into_result(self) -> std::result::Result<T, (u16, ApiError)> {
        let status_code = self.status_code;
        match (self.is_success(), self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err((status_code, error)),
            _ => Err((
                status_code,
                ApiError::new(UNKNOWN_ERROR_CODE, UNKNOWN_ERROR_MESSAGE),
            )),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status_code: self.status_code,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResponse", 3)?;
        state.serialize_field("statusCode", &self.status_code)?;
        match &self.data {
            Some(data) => state.serialize_field("data", data)?,
            None => state.serialize_field("data", &EmptyObject)?,
        }
        match &self.error {
            Some(error) => state.serialize_field("error", error)?,
            None => state.serialize_field("error", &EmptyObject)?,
        }
        state.end()
    }
}

struct EmptyObject;

impl Serialize for EmptyObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

fn body_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(200, true)]
    #[case(201, false)]
    #[case(204, false)]
    #[case(400, false)]
    #[case(401, false)]
    #[case(500, false)]
    fn test_success_predicate(#[case] status: u16, #[case] expected: bool) {
        let response = ApiResponse::success(status, json!({}));
        assert_eq!(response.is_success(), expected);
    }

    #[test]
    fn test_error_from_body() {
        let error = ApiError::from_body(&json!({"code": "INVALID_ORDER", "message": "Bad price"}));
        assert_eq!(error, ApiError::new("INVALID_ORDER", "Bad price"));
    }

    #[test]
    fn test_error_from_body_defaults() {
        assert_eq!(
            ApiError::from_body(&json!({})),
            ApiError::new("UNKNOWN_ERROR", "Unknown error occurred")
        );
        assert_eq!(
            ApiError::from_body(&json!("Service Unavailable")),
            ApiError::new("UNKNOWN_ERROR", "Unknown error occurred")
        );
        assert_eq!(
            ApiError::from_body(&json!({"code": "", "message": "only message"})),
            ApiError::new("UNKNOWN_ERROR", "only message")
        );
    }

    #[test]
    fn test_transport_failure_shape() {
        let response: ApiResponse<Value> = ApiResponse::transport_failure("connection refused");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 500,
                "data": {},
                "error": {"code": "UNKNOWN_ERROR", "message": "connection refused"}
            })
        );
    }

    #[test]
    fn test_success_shape() {
        let response = ApiResponse::success(200, vec!["SOL_USDC".to_string()]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "data": ["SOL_USDC"], "error": {}})
        );
    }

    #[test]
    fn test_into_result() {
        let ok = ApiResponse::success(200, 5u32).into_result();
        assert_eq!(ok, Ok(5));

        let err = ApiResponse::<u32>::failure(404, ApiError::new("NOT_FOUND", "missing"))
            .into_result()
            .unwrap_err();
        assert_eq!(err.0, 404);
        assert_eq!(err.1.code, "NOT_FOUND");
    }
}
