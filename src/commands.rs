//! 触发入口与 Tauri 命令
//!
//! 快捷键、托盘菜单与前端 `invoke` 最终都汇聚到这里：
//! - `trigger_recognition`：后台执行一次识别（取到图片后可选先确认）
//! - `open_settings` / `show_help`：托盘菜单项
//! - `recognize_clipboard` / `copy_text` / `hide_main_window`：前端命令

use tauri::{AppHandle, Emitter, Manager, State, WebviewWindow};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_shell::ShellExt;

use crate::clipboard::{SystemClipboard, writer};
use crate::error::AppError;
use crate::present::{Presenter, TauriView};
use crate::service::OcrServiceState;

/// OCR.space 免费 Key 申请页面。
pub const FREE_KEY_URL: &str = "https://ocr.space/ocrapi/freekey";

/// 前端打开设置面板的事件名。
pub const OPEN_SETTINGS_EVENT: &str = "ocr-open-settings";

const MAIN_WINDOW: &str = "main";

const HELP_TEXT: &str = "使用方法：\n\
1. 在 OCR.space 免费申请 API Key，并在托盘菜单「设置 API Key」中填写；\n\
2. 截图到剪贴板（Win+Shift+S / Cmd+Ctrl+Shift+4）；\n\
3. 按 Alt+Q，识别出的文字会自动复制到剪贴板。\n\n\
图片需小于 1 MB，支持 PNG / JPG / WEBP / BMP / GIF。";

fn show_and_focus(window: &WebviewWindow) {
    if let Err(err) = window.unminimize() {
        log::warn!("显示窗口失败（unminimize）: {err}");
    }
    if let Err(err) = window.show() {
        log::warn!("显示窗口失败（show）: {err}");
    }
    if let Err(err) = window.set_focus() {
        log::warn!("显示窗口失败（focus）: {err}");
    }
}

/// 识别服务初始化失败的原因，由 `setup` 注入，供后续触发时展示。
pub struct StartupFailure(pub String);

/// 识别服务不可用时展示给用户的说明。
pub fn unavailable_message(reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!(
            "识别服务初始化失败：{}\n\n请检查应用数据目录是否可读写，然后重启应用。",
            reason
        ),
        None => "识别服务尚未初始化，请重启应用。".to_string(),
    }
}

/// 取出识别服务；不可用时弹出错误对话框而不是只写日志。
fn service_state(app: &AppHandle) -> Option<State<'_, OcrServiceState>> {
    if let Some(state) = app.try_state::<OcrServiceState>() {
        return Some(state);
    }

    let reason = app
        .try_state::<StartupFailure>()
        .map(|failure| failure.0.clone());
    let message = unavailable_message(reason.as_deref());
    log::error!("❌ {}", message);
    app.dialog()
        .message(message)
        .title("OCR 一键识别")
        .kind(MessageDialogKind::Error)
        .show(|_| {});
    None
}

/// 弹出“识别前确认”框并等待用户选择。
async fn confirm_recognition(app: &AppHandle) -> bool {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .message("检测到剪贴板图片，是否进行 OCR？")
        .title("OCR 一键识别")
        .buttons(MessageDialogButtons::OkCancel)
        .show(move |confirmed| {
            let _ = tx.send(confirmed);
        });
    rx.await.unwrap_or(false)
}

/// 后台执行一次识别。
///
/// 先占用槽位并读取剪贴板；开启“识别前确认”时，确认框只在确实取到图片后出现。
pub fn trigger_recognition(app: &AppHandle) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        let Some(state) = service_state(&app) else {
            return;
        };
        let presenter = Presenter::new(TauriView::new(app.clone()));

        let confirm = match state.store().load() {
            Ok(prefs) => prefs.confirm_before_recognize,
            Err(err) => {
                log::warn!("读取识别偏好失败，按默认不确认处理: {err}");
                false
            }
        };

        let capture = match state.capture(SystemClipboard).await {
            Ok(capture) => capture,
            Err(err) => {
                presenter.present_error(&err).await;
                return;
            }
        };

        if confirm && !confirm_recognition(&app).await {
            log::info!("用户取消了本次识别");
            return;
        }

        let _ = state.finish(capture, &presenter).await;
    });
}

/// 托盘菜单「设置 API Key」。
pub fn open_settings(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        show_and_focus(&window);
    }
    if let Err(err) = app.emit_to(MAIN_WINDOW, OPEN_SETTINGS_EVENT, ()) {
        log::warn!("发送设置事件失败: {err}");
    }
}

/// 托盘菜单「帮助」。
pub fn show_help(app: &AppHandle) {
    let handle = app.clone();
    app.dialog()
        .message(HELP_TEXT)
        .title("OCR 一键识别 - 帮助")
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom(
            "申请免费 Key".to_string(),
            "关闭".to_string(),
        ))
        .show(move |open_site| {
            if !open_site {
                return;
            }
            #[allow(deprecated)]
            let opened = handle.shell().open(FREE_KEY_URL, None);
            if let Err(err) = opened {
                log::warn!("打开申请页面失败: {err}");
            }
        });
}

/// 前端触发识别，返回识别出的文字。
#[tauri::command]
pub async fn recognize_clipboard(
    app: AppHandle,
    state: State<'_, OcrServiceState>,
) -> Result<String, AppError> {
    let presenter = Presenter::new(TauriView::new(app.clone()));
    let result = state.run(SystemClipboard, &presenter).await?;
    Ok(result.text)
}

/// 结果对话框中的“复制”按钮。
#[tauri::command]
pub async fn copy_text(app: AppHandle, text: String) -> Result<(), AppError> {
    writer::write_text_off_thread(app, text).await?;
    Ok(())
}

/// 通知消失且没有打开对话框时，前端请求隐藏窗口。
#[tauri::command]
pub fn hide_main_window(window: tauri::Window) -> Result<(), AppError> {
    window
        .hide()
        .map_err(|e| AppError::Window(format!("隐藏窗口失败: {}", e)))
}
