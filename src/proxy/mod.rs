// proxy 模块 - Gemini 中转

pub mod error;
pub mod handlers; // API 端点处理器
pub mod mappers; // 请求归一化
pub mod upstream; // 上游客户端

pub use error::RelayError;
pub use upstream::{UpstreamClient, UpstreamTransport};
