//! Response assertion macros
//!
//! Error responses share one body shape, `{"error": <message>, "status": <code>}`.

/// Assert a response failed with `status`, optionally checking the message
#[macro_export]
macro_rules! assert_error {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        assert_eq!(response.status_code(), $status, "body: {}", response.text());
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], $status.as_u16());
        body
    }};
    ($response:expr, $status:expr, $message:expr) => {{
        let body = $crate::assert_error!($response, $status);
        assert_eq!(body["error"], $message);
        body
    }};
}

/// Assert a response succeeded with the given `msg` acknowledgement
#[macro_export]
macro_rules! assert_msg {
    ($response:expr, $message:expr) => {{
        let response = &$response;
        assert_eq!(
            response.status_code(),
            axum::http::StatusCode::OK,
            "body: {}",
            response.text()
        );
        let body: serde_json::Value = response.json();
        assert_eq!(body["msg"], $message);
        body
    }};
}
