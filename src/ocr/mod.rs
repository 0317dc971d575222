//! # 识别客户端模块（ocr）
//!
//! ## 设计思路
//!
//! 将“参数预检 → 构造请求 → 发送 → 解析 → 错误分类 → 回退”拆为多个子模块：
//!
//! - `config`：端点、超时、体积上限等固定参数
//! - `media`：MIME 类型到扩展名 / `filetype` 标签的映射
//! - `request`：主请求（multipart）与回退请求（Base64）构造
//! - `response`：响应模型与结果拼接
//! - `classify`：已知服务端错误表
//! - `client`：编排整条请求链路
//! - `error`：识别链路统一错误
//!
//! ```text
//! ClipboardImage + API Key
//!    ↓
//! client.rs（预检 + 体积检查，不联网）
//!    ↓
//! request.rs（multipart）→ POST → response.rs
//!    ↓ IsErroredOnProcessing?
//! classify.rs ──文件类型──→ request.rs（base64Image）→ POST → 第一条结果
//!    ↓
//! RecognitionResult / RecognitionError
//! ```

mod classify;
mod client;
mod config;
mod error;
mod media;
mod request;
mod response;

pub use classify::{ServerErrorClass, classify_server_error};
pub use client::OcrClient;
pub use config::{DEFAULT_ENDPOINT, MAX_IMAGE_BYTES, MIN_API_KEY_LEN, OcrConfig};
pub use error::RecognitionError;
pub use media::{FileKind, synthetic_file_name};

/// 识别结果（可能为空字符串以外的任意文本）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub text: String,
}
