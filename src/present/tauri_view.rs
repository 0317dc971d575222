//! Tauri 宿主下的展示实现
//!
//! - 剪贴板：`clipboard::writer`（插件优先，arboard 回退，在阻塞线程池中执行）
//! - 通知：向主窗口发送 `ocr-notice` 事件，并在不抢焦点的前提下显示窗口
//! - 错误对话框：`tauri-plugin-dialog` 的错误消息框

use tauri::{AppHandle, Emitter, Manager, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use super::{ErrorDialog, Notice, ResultView};
use crate::clipboard::writer;
use crate::ocr::RecognitionError;

/// 前端监听的通知事件名。
pub const NOTICE_EVENT: &str = "ocr-notice";

const MAIN_WINDOW: &str = "main";

pub struct TauriView<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriView<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    fn reveal_main_window(&self) {
        let Some(window) = self.app.get_webview_window(MAIN_WINDOW) else {
            log::warn!("主窗口不存在，通知只能写入日志");
            return;
        };
        if let Err(err) = window.show() {
            log::warn!("显示通知窗口失败（show）: {err}");
        }
    }
}

impl<R: Runtime> ResultView for TauriView<R> {
    async fn write_clipboard(&self, text: &str) -> Result<(), RecognitionError> {
        writer::write_text_off_thread(self.app.clone(), text.to_owned()).await
    }

    fn notify(&self, notice: Notice) {
        log::info!("🔔 {}：{}", notice.title, notice.body);
        self.reveal_main_window();
        if let Err(err) = self.app.emit_to(MAIN_WINDOW, NOTICE_EVENT, &notice) {
            log::warn!("发送通知事件失败: {err}");
        }
    }

    fn show_error_dialog(&self, dialog: ErrorDialog) {
        self.app
            .dialog()
            .message(dialog.message)
            .title(dialog.title)
            .kind(MessageDialogKind::Error)
            .show(|_| {});
    }
}
