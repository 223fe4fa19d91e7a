// 错误分类模块 - 将底层传输错误归类, 用于日志
use reqwest::Error;

/// 分类上游传输错误
///
/// 返回值: (错误类型, 英文提示)
/// - 错误类型: 用于日志字段
/// - 英文提示: 附在日志中便于排查, 不返回给客户端
pub fn classify_transport_error(error: &Error) -> (&'static str, &'static str) {
    if error.is_timeout() {
        (
            "timeout_error",
            "Request timeout, please check your network connection",
        )
    } else if error.is_connect() {
        (
            "connection_error",
            "Connection failed, please check your network or proxy settings",
        )
    } else if error.is_decode() {
        (
            "decode_error",
            "Upstream response could not be decoded",
        )
    } else if error.is_body() {
        (
            "body_error",
            "Upstream body transmission interrupted",
        )
    } else if error.is_builder() {
        ("builder_error", "Outbound request could not be built")
    } else {
        ("unknown_error", "Unknown error occurred")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        // 绑定后立即释放, 得到一个无人监听的端口
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .post(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();

        let (kind, _) = classify_transport_error(&err);
        assert_eq!(kind, "connection_error");
    }

    #[test]
    fn test_builder_error() {
        let err = reqwest::Client::new()
            .post("not a url")
            .build()
            .unwrap_err();
        let (kind, _) = classify_transport_error(&err);
        assert_eq!(kind, "builder_error");
    }
}
