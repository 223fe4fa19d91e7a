//! 中转服务配置

use axum::http::HeaderValue;
use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Gemini REST API 默认地址
pub const DEFAULT_UPSTREAM_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 默认模型
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid upstream base url '{url}': {source}")]
    InvalidUpstreamBase {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("model name must not be empty")]
    EmptyModel,

    #[error("invalid allowed origin '{0}'")]
    InvalidOrigin(String),
}

/// 中转服务配置
///
/// 启动时构建一次, 之后只读。
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// generateContent 端点 (不含 key)
    endpoint: Url,

    /// API 密钥, Debug 输出自动脱敏
    api_key: Option<SecretString>,

    /// CORS 允许的来源, None 表示允许任意来源
    allowed_origin: Option<HeaderValue>,

    /// 上游请求超时, 默认不设置
    request_timeout: Option<Duration>,
}

impl RelayConfig {
    pub fn new(upstream_base: &str, model: &str) -> Result<Self, ConfigError> {
        let model = model.trim();
        if model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        let raw = format!(
            "{}/models/{}:generateContent",
            upstream_base.trim_end_matches('/'),
            model
        );
        let endpoint = Url::parse(&raw).map_err(|source| ConfigError::InvalidUpstreamBase {
            url: upstream_base.to_string(),
            source,
        })?;

        Ok(Self {
            endpoint,
            api_key: None,
            allowed_origin: None,
            request_timeout: None,
        })
    }

    /// 空字符串视为未配置
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::new);
        self
    }

    /// `*` 或空值表示允许任意来源
    pub fn with_allowed_origin(mut self, origin: Option<String>) -> Result<Self, ConfigError> {
        self.allowed_origin = match origin.as_deref().map(str::trim) {
            None | Some("") | Some("*") => None,
            Some(value) => Some(
                HeaderValue::from_str(value)
                    .map_err(|_| ConfigError::InvalidOrigin(value.to_string()))?,
            ),
        };
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    pub fn allowed_origin(&self) -> Option<&HeaderValue> {
        self.allowed_origin.as_ref()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPSTREAM_BASE, DEFAULT_MODEL).expect("default endpoint is a valid url")
    }
}
