use crate::core::models::RelayConfig;
use crate::proxy::{UpstreamClient, UpstreamTransport};
use std::sync::Arc;

/// Web 应用状态
///
/// 启动后只读, 请求之间不共享可变状态。
pub struct AppState {
    pub config: RelayConfig,
    pub upstream: Arc<dyn UpstreamTransport>,
}

impl AppState {
    /// 使用 reqwest 上游客户端
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(config.endpoint().clone(), config.request_timeout())?;
        Ok(Self::with_upstream(config, Arc::new(upstream)))
    }

    /// 注入任意上游实现 (测试使用替身)
    pub fn with_upstream(config: RelayConfig, upstream: Arc<dyn UpstreamTransport>) -> Self {
        Self { config, upstream }
    }
}
