//! # 识别客户端
//!
//! ## 设计思路
//!
//! `OcrClient` 只负责“图片字节 + Key → 文字”这一段，不接触剪贴板与界面。
//! 处理链路：
//! 1. 本地预检（Key 是否存在、长度是否合理）
//! 2. 体积检查（空图片、超过 1 MiB），均在联网之前完成
//! 3. 主请求：multipart 文件上传
//! 4. 服务端报“无法识别文件类型”时，改用 Base64 内联再试一次
//!
//! ## 实现思路
//!
//! - 主请求与回退请求都包在同一个 `tokio::time::timeout` 里，超时即丢弃 future 取消请求。
//! - 主请求拼接全部结果；回退请求只取第一条结果。
//! - 复用同一个 `reqwest::Client`，避免重复建立连接池。

use std::time::{Duration, Instant};

use reqwest::multipart::Form;

use super::classify::{ServerErrorClass, classify_server_error};
use super::request::{fallback_form, primary_form};
use super::response::OcrResponse;
use super::{OcrConfig, RecognitionError, RecognitionResult};
use crate::clipboard::ClipboardImage;
use crate::settings::mask_key;

/// OCR.space 识别客户端。
pub struct OcrClient {
    http: reqwest::Client,
    config: OcrConfig,
}

impl OcrClient {
    /// 根据配置创建客户端。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use clipboard_ocr::ocr::{OcrClient, OcrConfig};
    ///
    /// let client = OcrClient::new(OcrConfig::default())?;
    /// # Ok::<(), clipboard_ocr::ocr::RecognitionError>(())
    /// ```
    pub fn new(config: OcrConfig) -> Result<Self, RecognitionError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| RecognitionError::Network(format!("创建 HTTP 客户端失败：{}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// 联网前的全部检查：Key 预检 + 体积检查。
    pub fn precheck(&self, image: &ClipboardImage, api_key: &str) -> Result<(), RecognitionError> {
        let key = api_key.trim();
        if key.is_empty() {
            return Err(RecognitionError::MissingKey);
        }
        if key.chars().count() < self.config.min_key_len {
            return Err(RecognitionError::InvalidKey(format!(
                "长度不足 {} 个字符，请检查是否完整复制",
                self.config.min_key_len
            )));
        }

        if image.bytes.is_empty() {
            return Err(RecognitionError::EmptyImage);
        }
        if image.bytes.len() > self.config.max_image_bytes {
            return Err(RecognitionError::ImageTooLarge {
                size: image.bytes.len(),
                limit: self.config.max_image_bytes,
            });
        }

        Ok(())
    }

    /// 识别一张图片。
    pub async fn recognize(
        &self,
        image: &ClipboardImage,
        api_key: &str,
    ) -> Result<RecognitionResult, RecognitionError> {
        self.precheck(image, api_key)?;
        let key = api_key.trim();

        log::info!(
            "🔍 开始识别 - {} 字节, 类型: {}, Key: {}",
            image.bytes.len(),
            image.media_type,
            mask_key(key)
        );

        let started = Instant::now();
        let response = self.post(primary_form(image, &self.config)?, key).await?;

        if response.is_errored {
            let message = response.error_text();
            log::warn!("⚠️ 服务端返回错误: {}", message);

            return match classify_server_error(&message) {
                Some(ServerErrorClass::UnsupportedFileType) => {
                    log::info!("🔁 文件类型识别失败，改用 Base64 回退请求");
                    self.recognize_inline(image, key).await
                }
                Some(ServerErrorClass::InvalidKey) => Err(RecognitionError::InvalidKey(message)),
                Some(ServerErrorClass::RateLimited) => Err(RecognitionError::RateLimited(message)),
                None => Err(RecognitionError::ServerError(message)),
            };
        }

        let text = response.joined_text();
        log::info!(
            "✅ 识别完成 - {} 条结果, {} 个字符, 耗时 {:?}",
            response.parsed_results.len(),
            text.chars().count(),
            started.elapsed()
        );

        if text.is_empty() {
            return Err(RecognitionError::EmptyResult);
        }
        Ok(RecognitionResult { text })
    }

    /// 回退路径：Base64 内联上传，只取第一条结果。
    async fn recognize_inline(
        &self,
        image: &ClipboardImage,
        key: &str,
    ) -> Result<RecognitionResult, RecognitionError> {
        let response = self.post(fallback_form(image, &self.config), key).await?;

        if response.is_errored {
            let message = response.error_text();
            log::warn!("⚠️ Base64 回退请求仍失败: {}", message);
            return Err(RecognitionError::UnsupportedFileType(message));
        }

        let text = response.first_text();
        if text.is_empty() {
            return Err(RecognitionError::EmptyResult);
        }
        Ok(RecognitionResult { text })
    }

    /// 发送请求并解析响应，整个过程受 `request_timeout` 约束。
    async fn post(&self, form: Form, key: &str) -> Result<OcrResponse, RecognitionError> {
        let timeout = self.config.request_timeout;

        let exchange = async {
            let response = self
                .http
                .post(&self.config.endpoint)
                .header("apikey", key)
                .multipart(form)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => return Err(map_transport_error(err, &self.config)),
            Err(_) => {
                log::warn!("⏱️ OCR 请求超过 {:?} 未完成，已取消", timeout);
                return Err(RecognitionError::Timeout(timeout.as_secs()));
            }
        };

        log::debug!("📨 OCR 响应 - 状态: {}, {} 字节", status, body.len());
        OcrResponse::parse(&body)
    }
}

/// 实际触发的超时：连接阶段超时对应 `connect_timeout`，其余对应 `request_timeout`。
fn fired_timeout(is_connect: bool, config: &OcrConfig) -> Duration {
    if is_connect {
        config.connect_timeout
    } else {
        config.request_timeout
    }
}

fn map_transport_error(err: reqwest::Error, config: &OcrConfig) -> RecognitionError {
    if err.is_timeout() {
        let fired = fired_timeout(err.is_connect(), config);
        log::warn!("⏱️ OCR 请求超时（{:?}）: {}", fired, err);
        RecognitionError::Timeout(fired.as_secs())
    } else {
        log::warn!("🌐 OCR 网络请求失败: {}", err);
        RecognitionError::Network(err.to_string())
    }
}
