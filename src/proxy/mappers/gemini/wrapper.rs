// 入站请求归一化
use bytes::Bytes;
use serde_json::Value;

use super::models::{GenerateContentRequest, OutboundPayload};
use crate::proxy::error::RelayError;

pub const INVALID_PROMPT_MESSAGE: &str = "Prompt is required and must be a non-empty string.";

/// 将入站请求体转换为上游请求
///
/// 支持两种格式:
/// - `{prompt, schema?}`: 构建 Gemini 请求
/// - `{contents, generationConfig?}`: 仅校验 `contents[0].parts[0].text`, 原始字节原样转发
///
/// 仅当 `contents[0].parts[0].text` 存在时按原生格式处理, 否则按 `prompt` 处理。
pub fn wrap_request(body: &Bytes) -> Result<OutboundPayload, RelayError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::InvalidInput(format!("Request body must be valid JSON: {}", e)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| RelayError::InvalidInput("Request body must be a JSON object.".to_string()))?;

    if let Some(native_text) = value.pointer("/contents/0/parts/0/text") {
        validate_prompt(Some(native_text))?;
        return Ok(OutboundPayload::Passthrough(body.clone()));
    }

    let prompt = validate_prompt(obj.get("prompt"))?;
    let schema = obj.get("schema").filter(|s| !s.is_null()).cloned();

    Ok(OutboundPayload::Built(GenerateContentRequest::from_prompt(
        prompt, schema,
    )))
}

/// prompt 必须是 trim 后非空的字符串; 返回原始 (未 trim) 值
fn validate_prompt(prompt: Option<&Value>) -> Result<&str, RelayError> {
    match prompt.and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(RelayError::InvalidInput(INVALID_PROMPT_MESSAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap(value: Value) -> Result<OutboundPayload, RelayError> {
        wrap_request(&Bytes::from(value.to_string()))
    }

    fn built(payload: OutboundPayload) -> Value {
        serde_json::from_slice(&payload.into_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_prompt_without_schema() {
        let payload = built(wrap(json!({"prompt": "Explain TCP"})).unwrap());
        assert_eq!(
            payload,
            json!({"contents": [{"role": "user", "parts": [{"text": "Explain TCP"}]}]})
        );
        assert!(payload.get("generationConfig").is_none());
    }

    #[test]
    fn test_prompt_with_schema() {
        let schema = json!({"type": "OBJECT", "properties": {"answer": {"type": "STRING"}}});
        let payload = built(wrap(json!({"prompt": "Quiz me", "schema": schema.clone()})).unwrap());
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "Quiz me");
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(payload["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_null_schema_is_absent() {
        let payload = built(wrap(json!({"prompt": "hi", "schema": null})).unwrap());
        assert!(payload.get("generationConfig").is_none());
    }

    #[test]
    fn test_prompt_forwarded_untrimmed() {
        let payload = built(wrap(json!({"prompt": "  padded  "})).unwrap());
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "  padded  ");
    }

    #[test]
    fn test_unusable_prompts_rejected() {
        let cases = [
            json!({}),
            json!({"prompt": null}),
            json!({"prompt": 42}),
            json!({"prompt": ["a"]}),
            json!({"prompt": ""}),
            json!({"prompt": " \n\t "}),
            json!({"schema": {"type": "OBJECT"}}),
        ];
        for case in cases {
            match wrap(case.clone()) {
                Err(RelayError::InvalidInput(message)) => {
                    assert_eq!(message, INVALID_PROMPT_MESSAGE, "case {}", case)
                }
                other => panic!("expected InvalidInput for {}, got {:?}", case, other),
            }
        }
    }

    #[test]
    fn test_non_object_and_malformed_rejected() {
        assert!(matches!(
            wrap(json!(["prompt"])),
            Err(RelayError::InvalidInput(_))
        ));
        assert!(matches!(
            wrap_request(&Bytes::from_static(b"{not json")),
            Err(RelayError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_passthrough_keeps_original_bytes() {
        // 保留原始字段顺序与空白
        let raw = Bytes::from_static(
            br#"{ "generationConfig": {"responseMimeType": "application/json", "responseSchema": {"type": "ARRAY"}},
                 "contents": [{"role": "user", "parts": [{"text": "List ports"}]}], "extra": 1 }"#,
        );
        let payload = wrap_request(&raw).unwrap();
        assert_eq!(payload, OutboundPayload::Passthrough(raw.clone()));
        assert_eq!(payload.into_bytes().unwrap(), raw);
    }

    #[test]
    fn test_contents_without_usable_text_rejected() {
        let cases = [
            json!({"contents": []}),
            json!({"contents": [{"role": "user", "parts": []}]}),
            json!({"contents": [{"role": "user", "parts": [{"text": "   "}]}]}),
            json!({"contents": [{"role": "user", "parts": [{"inlineData": {}}]}]}),
            json!({"contents": "hello"}),
        ];
        for case in cases {
            assert!(
                matches!(wrap(case.clone()), Err(RelayError::InvalidInput(_))),
                "case {}",
                case
            );
        }
    }

    #[test]
    fn test_contents_wins_over_prompt() {
        let raw = json!({
            "prompt": "",
            "contents": [{"role": "user", "parts": [{"text": "native"}]}]
        });
        assert!(matches!(
            wrap(raw).unwrap(),
            OutboundPayload::Passthrough(_)
        ));
    }

    #[test]
    fn test_prompt_used_when_contents_has_no_text() {
        for raw in [
            json!({"prompt": "hello", "contents": []}),
            json!({"prompt": "hello", "contents": [{"role": "user", "parts": []}]}),
            json!({"prompt": "hello", "contents": null}),
        ] {
            let payload = wrap(raw.clone()).unwrap();
            assert!(
                matches!(payload, OutboundPayload::Built(_)),
                "case {}",
                raw
            );
            assert_eq!(built(payload)["contents"][0]["parts"][0]["text"], "hello");
        }
    }
}
