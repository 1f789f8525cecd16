//! Plain-text response helpers
//!
//! Every error body is a single `Error: ...` line.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::errors::FlatlinkerError;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// 构建纯文本响应
pub fn text_response(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(TEXT_PLAIN)
        .body(body.into())
}

/// 构建错误响应
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    text_response(status, format!("Error: {}\n", message))
}

/// 从 FlatlinkerError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_flatlinker(err: &FlatlinkerError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}
