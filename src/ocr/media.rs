//! # 媒体类型映射
//!
//! 剪贴板给出的是 MIME 类型，OCR 服务需要的是文件扩展名与 `filetype` 标签。
//! 未知类型一律按 PNG 标注，与剪贴板读取阶段的 PNG 编码保持一致。

use chrono::Local;

/// 服务端认识的文件类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Png,
    Jpg,
    Webp,
    Bmp,
    Gif,
}

impl FileKind {
    /// 从 MIME 类型解析（忽略大小写与参数部分），未知类型回退为 PNG。
    ///
    /// # 示例
    /// ```rust
    /// use clipboard_ocr::ocr::FileKind;
    ///
    /// assert_eq!(FileKind::from_media_type("image/jpeg"), FileKind::Jpg);
    /// assert_eq!(FileKind::from_media_type("image/x-icon"), FileKind::Png);
    /// ```
    pub fn from_media_type(media_type: &str) -> Self {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpg,
            "image/webp" => Self::Webp,
            "image/bmp" => Self::Bmp,
            "image/gif" => Self::Gif,
            _ => Self::Png,
        }
    }

    /// 文件扩展名（不含点）。
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
        }
    }

    /// 请求中 `filetype` 字段的取值。
    pub fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpg => "JPG",
            Self::Webp => "WEBP",
            Self::Bmp => "BMP",
            Self::Gif => "GIF",
        }
    }

    /// 上传分片使用的 MIME 类型。
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
        }
    }
}

/// 基于当前时间生成上传文件名，例如 `clipboard_20240101123045123.png`。
pub fn synthetic_file_name(kind: FileKind) -> String {
    let timestamp = Local::now().format("%Y%m%d%H%M%S%3f");
    format!("clipboard_{}.{}", timestamp, kind.extension())
}
