// Gemini generateContent 请求模型
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Part {
    pub text: String,
}

/// 结构化输出配置
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    /// 单轮 user 消息, 有 schema 时要求 JSON 输出
    pub fn from_prompt(prompt: &str, schema: Option<Value>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        }
    }
}

/// 发往上游的请求体
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPayload {
    /// 由 `{prompt, schema}` 构建
    Built(GenerateContentRequest),
    /// 客户端已是 Gemini 原生格式, 原样转发
    Passthrough(Bytes),
}

impl OutboundPayload {
    pub fn into_bytes(self) -> Result<Bytes, serde_json::Error> {
        match self {
            Self::Built(request) => serde_json::to_vec(&request).map(Bytes::from),
            Self::Passthrough(raw) => Ok(raw),
        }
    }
}
