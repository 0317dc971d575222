//! 系统剪贴板快照（arboard）
//!
//! `arboard` 只提供解码后的 RGBA 像素，这里在读取时统一编码为 PNG，
//! 因此系统快照里的图片条目类型固定为 `image/png`。
//! 剪贴板同时存在文本时额外给出一个 `text/plain` 条目。

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use super::{ClipboardAccessError, ClipboardSource, SnapshotItem};

/// 基于 `arboard` 的系统剪贴板。
///
/// 每次读取都新建 `arboard::Clipboard`，避免长期持有平台句柄。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

fn map_arboard_error(error: arboard::Error) -> ClipboardAccessError {
    match error {
        arboard::Error::ClipboardNotSupported => {
            ClipboardAccessError::Unsupported(error.to_string())
        }
        other => ClipboardAccessError::DataError(other.to_string()),
    }
}

/// 将 RGBA 像素编码为 PNG 字节。
fn encode_png(width: usize, height: usize, rgba: Vec<u8>) -> Result<Vec<u8>, ClipboardAccessError> {
    let buffer = RgbaImage::from_raw(width as u32, height as u32, rgba).ok_or_else(|| {
        ClipboardAccessError::DataError(format!("图像缓冲区尺寸不匹配：{}x{}", width, height))
    })?;

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| ClipboardAccessError::DataError(format!("PNG 编码失败：{}", e)))?;
    Ok(cursor.into_inner())
}

impl ClipboardSource for SystemClipboard {
    type Item = SnapshotItem;

    fn read(&mut self) -> Result<Vec<Self::Item>, ClipboardAccessError> {
        let mut clipboard = arboard::Clipboard::new().map_err(map_arboard_error)?;
        let mut items = Vec::new();

        match clipboard.get_image() {
            Ok(image_data) => {
                log::debug!("🖼️ 剪贴板图片 {}x{}", image_data.width, image_data.height);
                let png = encode_png(
                    image_data.width,
                    image_data.height,
                    image_data.bytes.into_owned(),
                )?;
                items.push(SnapshotItem::new().with("image/png", png));
            }
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(err) => {
                let mapped = map_arboard_error(err);
                items.push(SnapshotItem::new().with_failure("image/png", mapped));
            }
        }

        match clipboard.get_text() {
            Ok(text) => items.push(SnapshotItem::new().with("text/plain", text.into_bytes())),
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(err) => log::debug!("读取剪贴板文本失败（忽略）: {}", err),
        }

        Ok(items)
    }
}
