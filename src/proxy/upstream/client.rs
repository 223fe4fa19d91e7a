// 上游客户端
use async_trait::async_trait;
use axum::http::StatusCode;
use bytes::Bytes;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::proxy::mappers::error_classifier::classify_transport_error;

/// 上游原始响应
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// 传输失败, 消息中不含请求 URL (URL 带有密钥)
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: &'static str,
    pub message: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let (kind, hint) = classify_transport_error(&error);
        Self {
            kind,
            message: format!("{} ({})", error.without_url(), hint),
        }
    }
}

/// 调用 generateContent 的能力, 由 handler 通过状态注入
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// 发送一次请求, 不重试
    async fn generate_content(
        &self,
        api_key: &SecretString,
        body: Bytes,
    ) -> Result<UpstreamResponse, TransportError>;
}

/// 基于 reqwest 的上游客户端
pub struct UpstreamClient {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl UpstreamClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            endpoint,
        })
    }
}

#[async_trait]
impl UpstreamTransport for UpstreamClient {
    async fn generate_content(
        &self,
        api_key: &SecretString,
        body: Bytes,
    ) -> Result<UpstreamResponse, TransportError> {
        tracing::debug!("Forwarding {} bytes to {}", body.len(), self.endpoint);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .query(&[("key", api_key.expose_secret().as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(UpstreamResponse { status, body })
    }
}
