//! 识别结果写回剪贴板
//!
//! 优先使用宿主提供的剪贴板能力（`tauri-plugin-clipboard-manager`），
//! 不可用时回退到直接操作系统剪贴板（`arboard`）。
//! 两条路径都失败时如实上报，不静默吞掉。

use tauri::{AppHandle, Runtime};
use tauri_plugin_clipboard_manager::ClipboardExt;

use crate::ocr::RecognitionError;

/// 依次尝试首选与回退写入方式。
pub(crate) fn write_with_fallback<P, F>(preferred: P, fallback: F) -> Result<(), RecognitionError>
where
    P: FnOnce() -> Result<(), String>,
    F: FnOnce() -> Result<(), String>,
{
    let preferred_err = match preferred() {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    log::warn!("⚠️ 首选剪贴板写入失败，改用回退方式: {}", preferred_err);

    fallback().map_err(|fallback_err| {
        log::error!("❌ 回退剪贴板写入也失败: {}", fallback_err);
        RecognitionError::ClipboardWrite(format!(
            "首选方式：{}；回退方式：{}",
            preferred_err, fallback_err
        ))
    })
}

/// 通过 `arboard` 直接写入文本。
pub fn write_text_direct(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(text.to_owned()).map_err(|e| e.to_string())
}

/// 将文本写入剪贴板。
pub fn write_text<R: Runtime>(app: &AppHandle<R>, text: &str) -> Result<(), RecognitionError> {
    write_with_fallback(
        || app.clipboard().write_text(text.to_owned()).map_err(|e| e.to_string()),
        || write_text_direct(text),
    )
}

/// 在阻塞线程池中写入文本，供异步上下文调用。
pub async fn write_text_off_thread<R: Runtime>(
    app: AppHandle<R>,
    text: String,
) -> Result<(), RecognitionError> {
    tokio::task::spawn_blocking(move || write_text(&app, &text))
        .await
        .map_err(|e| RecognitionError::ClipboardWrite(format!("线程执行失败：{}", e)))?
}
