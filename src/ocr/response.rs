//! # 响应模型
//!
//! OCR.space 的 `ErrorMessage` 有时是字符串，有时是字符串数组，
//! 这里统一展平为一条消息，`ErrorDetails` 存在时追加在后面。

use serde::Deserialize;
use serde_json::Value;

use super::RecognitionError;

/// 响应体预览的最大字符数（解析失败时写进错误信息）。
const RAW_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OcrResponse {
    #[serde(rename = "IsErroredOnProcessing", default)]
    pub(crate) is_errored: bool,
    #[serde(rename = "ErrorMessage", default)]
    error_message: Value,
    #[serde(rename = "ErrorDetails", default)]
    error_details: Value,
    #[serde(rename = "ParsedResults", default)]
    pub(crate) parsed_results: Vec<ParsedResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    pub(crate) parsed_text: String,
}

fn flatten_message(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.trim().to_string()],
        Value::Array(items) => items.iter().flat_map(flatten_message).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

impl OcrResponse {
    /// 解析响应体；不是合法 JSON 时带上原始内容前缀报错。
    pub(crate) fn parse(body: &str) -> Result<Self, RecognitionError> {
        serde_json::from_str(body).map_err(|e| {
            let preview: String = body.chars().take(RAW_BODY_PREVIEW_CHARS).collect();
            log::warn!("⚠️ OCR 响应不是合法 JSON: {}", e);
            RecognitionError::ServerError(format!("服务返回了无法解析的响应：{}", preview))
        })
    }

    /// 服务端错误信息（`ErrorMessage` + `ErrorDetails`）。
    pub(crate) fn error_text(&self) -> String {
        let mut parts = flatten_message(&self.error_message);
        parts.extend(flatten_message(&self.error_details));
        parts.retain(|p| !p.is_empty());

        if parts.is_empty() {
            "未知错误".to_string()
        } else {
            parts.join("; ")
        }
    }

    /// 主请求的结果拼接：逐条去空白、丢弃空结果、以空行分隔，保持服务端顺序。
    pub(crate) fn joined_text(&self) -> String {
        self.parsed_results
            .iter()
            .map(|r| r.parsed_text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// 回退请求只取第一条结果。
    pub(crate) fn first_text(&self) -> String {
        self.parsed_results
            .first()
            .map(|r| r.parsed_text.trim().to_string())
            .unwrap_or_default()
    }
}
