//! # 识别参数配置
//!
//! ## 设计思路
//!
//! 将请求链路的固定参数（端点、超时、体积上限、识别语言与引擎）集中到
//! `OcrConfig`，生产环境使用 `Default`，测试可以把端点指向本地模拟服务。
//! 用户可变状态（API Key）不在这里，由 `settings::ConfigStore` 持久化，
//! 每次调用时显式传入客户端。

use std::time::Duration;

/// OCR.space 公共识别端点。
pub const DEFAULT_ENDPOINT: &str = "https://api.ocr.space/parse/image";

/// 单张图片允许上传的最大体积（1 MiB，免费 Key 的服务端上限）。
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

/// API Key 最短长度，只做粗略的本地健全性检查，服务端才是权威。
pub const MIN_API_KEY_LEN: usize = 10;

/// 识别请求配置。
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// 识别服务地址。
    pub endpoint: String,
    /// 单次请求（含读取响应体）的总超时，主请求与回退请求共用。
    pub request_timeout: Duration,
    /// 建立连接（TCP/TLS）超时。
    pub connect_timeout: Duration,
    /// 上传前允许的最大图片字节数。
    pub max_image_bytes: usize,
    /// 本地 Key 长度下限。
    pub min_key_len: usize,
    /// 识别语言提示（`chs` = 简体中文）。
    pub language: String,
    /// 服务端识别引擎编号。
    pub engine: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(8),
            max_image_bytes: MAX_IMAGE_BYTES,
            min_key_len: MIN_API_KEY_LEN,
            language: "chs".to_string(),
            engine: 2,
        }
    }
}

impl OcrConfig {
    /// 以指定端点构造配置，其余参数保持默认。
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}
