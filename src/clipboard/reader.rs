//! 剪贴板图片读取
//!
//! 两轮扫描：
//! 1. 按固定优先级匹配已知图片类型（PNG → JPEG → WEBP → BMP → GIF）
//! 2. 第一轮一无所获时，接受任何 `image/` 前缀的类型
//!
//! 两轮都要求取出的字节非空。

use super::{ClipboardAccessError, ClipboardImage, ClipboardItem, ClipboardSource};
use crate::ocr::RecognitionError;

/// 已知图片类型的优先级顺序。
pub const IMAGE_TYPE_PREFERENCE: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/bmp",
    "image/gif",
];

const GENERIC_IMAGE_PREFIX: &str = "image/";

/// 扫描过程中的状态：记录可恢复的读取失败。
#[derive(Default)]
struct ScanState {
    last_data_error: Option<ClipboardAccessError>,
}

impl ScanState {
    /// 尝试物化一种类型；权限错误立即终止，数据错误记下后继续扫描。
    fn materialize<I: ClipboardItem>(
        &mut self,
        item: &I,
        media_type: &str,
    ) -> Result<Option<ClipboardImage>, RecognitionError> {
        match item.get_type(media_type) {
            Ok(bytes) if !bytes.is_empty() => Ok(Some(ClipboardImage {
                bytes,
                media_type: media_type.to_ascii_lowercase(),
            })),
            Ok(_) => {
                log::debug!("⏭️ {} 数据为空，跳过", media_type);
                Ok(None)
            }
            Err(ClipboardAccessError::DataError(msg)) => {
                log::warn!("⚠️ 读取 {} 失败: {}", media_type, msg);
                self.last_data_error = Some(ClipboardAccessError::DataError(msg));
                Ok(None)
            }
            Err(fatal) => Err(fatal.into()),
        }
    }
}

/// 从剪贴板读取第一张可用图片。
///
/// # 返回
/// - `Ok(Some(image))`：找到图片
/// - `Ok(None)`：剪贴板里没有图片
/// - `Err(..)`：权限被拒绝 / 环境不支持 / 数据读取失败
pub fn read_image<S: ClipboardSource>(
    source: &mut S,
) -> Result<Option<ClipboardImage>, RecognitionError> {
    let items = source.read()?;
    log::debug!("📋 剪贴板共 {} 个条目", items.len());

    let mut state = ScanState::default();

    for item in &items {
        let types = item.types();
        for preferred in IMAGE_TYPE_PREFERENCE {
            if !types.iter().any(|t| t.eq_ignore_ascii_case(preferred)) {
                continue;
            }
            if let Some(image) = state.materialize(item, preferred)? {
                return Ok(Some(image));
            }
        }
    }

    for item in &items {
        for media_type in item.types() {
            let lowered = media_type.to_ascii_lowercase();
            if !lowered.starts_with(GENERIC_IMAGE_PREFIX)
                || IMAGE_TYPE_PREFERENCE.iter().any(|known| *known == lowered)
            {
                continue;
            }
            if let Some(image) = state.materialize(item, &media_type)? {
                log::info!("🖼️ 通过通用图片类型匹配到 {}", media_type);
                return Ok(Some(image));
            }
        }
    }

    match state.last_data_error {
        Some(err) => Err(err.into()),
        None => Ok(None),
    }
}
