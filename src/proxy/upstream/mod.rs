// Upstream 模块 - 上游调用能力
pub mod client;

pub use client::{TransportError, UpstreamClient, UpstreamResponse, UpstreamTransport};
