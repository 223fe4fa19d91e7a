// 中转错误 - 每种错误对请求都是终态, 不重试
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Gemini API key not configured on the server.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to communicate with Gemini API.";

#[derive(Debug, Error)]
pub enum RelayError {
    /// 请求体或 prompt 不可用, 不发起上游调用
    #[error("{0}")]
    InvalidInput(String),

    /// 未配置 API 密钥, 不发起上游调用
    #[error("Gemini API key is not configured")]
    MissingCredential,

    /// 上游返回非 2xx
    #[error("Gemini API responded with {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// 网络或解析失败
    #[error("transport failure: {0}")]
    Transport(String),
}

/// 错误响应体 `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredential | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
        }
    }

    /// 返回给客户端的消息, 传输层细节只记录日志不外泄
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            Self::Upstream { body, .. } => {
                format!("Gemini API responded with an error: {}", body)
            }
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.client_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
