//! User-facing messages for request outcomes.
//!
//! Pure functions that decide what, if anything, the user is told after a
//! request. The HTTP client calls them; they never perform I/O.

use reqwest::Method;
use serde_json::Value;

use crate::error::Error;

/// Server message for a read-count increment. Responses carrying it are
/// not announced.
pub const READ_COUNT_SENTINEL: &str = "阅读次数已增加";

/// Success notice used when the caller supplied none.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "操作成功";

/// Failure notice for requests that were never sent.
pub const GENERIC_FAILURE_MESSAGE: &str = "请求失败，请检查您的网络或联系管理员。";

/// Failure notice for requests that got no response.
pub const UNREACHABLE_MESSAGE: &str = "无法连接到服务器，请检查您的网络。";

/// Returns `true` for methods that change server state.
pub fn is_state_changing(method: &Method) -> bool {
    *method == Method::POST
        || *method == Method::PUT
        || *method == Method::PATCH
        || *method == Method::DELETE
}

/// Decides the success notice for a completed request, if any.
///
/// Reads never produce a notice. State-changing requests produce the
/// caller's message, or [`DEFAULT_SUCCESS_MESSAGE`], unless the payload's
/// `msg` is [`READ_COUNT_SENTINEL`].
pub fn success_message(method: &Method, payload: &Value, custom: Option<&str>) -> Option<String> {
    if !is_state_changing(method) {
        return None;
    }

    if payload.get("msg").and_then(Value::as_str) == Some(READ_COUNT_SENTINEL) {
        return None;
    }

    Some(custom.unwrap_or(DEFAULT_SUCCESS_MESSAGE).to_string())
}

/// Message for a response with an error status.
///
/// A non-empty server `detail` wins over the built-in status text.
pub fn status_message(status: u16, detail: Option<&str>) -> String {
    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        return format!("[{}] {}", status, detail);
    }

    match status {
        400 => "请求无效 (400)".to_string(),
        401 => "未授权，请重新登录 (401)".to_string(),
        403 => "禁止访问 (403)".to_string(),
        404 => "请求资源未找到 (404)".to_string(),
        500 | 502 | 503 => format!("服务器错误 ({})", status),
        _ => format!("请求失败，状态码: {}", status),
    }
}

/// Message shown to the user for a failed request.
pub fn failure_message(error: &Error) -> String {
    match error {
        Error::Http { status, detail } => status_message(*status, detail.as_deref()),
        Error::Network(_) => UNREACHABLE_MESSAGE.to_string(),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}
