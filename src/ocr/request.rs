//! # 请求构造
//!
//! 两种请求形态共用同一组固定参数：
//! - 主请求：`file` 分片携带原始字节与合成文件名
//! - 回退请求：`base64Image` 字段携带 Data URL

use base64::{Engine as _, engine::general_purpose};
use reqwest::multipart::{Form, Part};

use super::media::{FileKind, synthetic_file_name};
use super::{OcrConfig, RecognitionError};
use crate::clipboard::ClipboardImage;

/// 追加语言、方向检测、放大、引擎与显式文件类型等固定参数。
fn with_fixed_params(form: Form, config: &OcrConfig, kind: FileKind) -> Form {
    form.text("language", config.language.clone())
        .text("isOverlayRequired", "false")
        .text("detectOrientation", "true")
        .text("scale", "true")
        .text("OCREngine", config.engine.to_string())
        .text("filetype", kind.label())
}

/// 构造主请求（multipart 文件上传）。
pub(crate) fn primary_form(
    image: &ClipboardImage,
    config: &OcrConfig,
) -> Result<Form, RecognitionError> {
    let kind = FileKind::from_media_type(&image.media_type);
    let file_name = synthetic_file_name(kind);
    log::debug!("🧾 主请求文件名: {} (filetype={})", file_name, kind.label());

    let part = Part::bytes(image.bytes.clone())
        .file_name(file_name)
        .mime_str(kind.mime())
        .map_err(|e| RecognitionError::Network(format!("构造上传数据失败：{}", e)))?;

    Ok(with_fixed_params(Form::new().part("file", part), config, kind))
}

/// 将图片编码为 `data:<mediaType>;base64,<data>`。
pub(crate) fn data_uri(image: &ClipboardImage) -> String {
    format!(
        "data:{};base64,{}",
        image.media_type,
        general_purpose::STANDARD.encode(&image.bytes)
    )
}

/// 构造回退请求（Base64 内联上传）。
pub(crate) fn fallback_form(image: &ClipboardImage, config: &OcrConfig) -> Form {
    let kind = FileKind::from_media_type(&image.media_type);
    with_fixed_params(
        Form::new().text("base64Image", data_uri(image)),
        config,
        kind,
    )
}
