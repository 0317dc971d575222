//! # 结果展示模块（present）
//!
//! ## 设计思路
//!
//! 展示层与具体 UI 工具包解耦：`Presenter` 只决定“展示什么、按什么顺序展示”，
//! 具体怎么写剪贴板、怎么弹通知和对话框交给 `ResultView` 实现。
//! 生产环境使用 `TauriView`，测试使用记录型实现。
//!
//! ## 展示规则
//!
//! - 成功：写剪贴板 → 通知“字符数 + 前 60 字预览”，通知可展开完整文本
//! - 失败：先通知错误第一行，间隔片刻再弹出阻塞对话框（完整信息 + 补救建议）

mod tauri_view;

pub use tauri_view::{NOTICE_EVENT, TauriView};

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::ocr::{RecognitionError, RecognitionResult};

/// 通知预览的最大字符数。
pub const PREVIEW_CHARS: usize = 60;

/// 错误通知与错误对话框之间的间隔，避免两层瞬时 UI 重叠。
pub const ERROR_DIALOG_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// 瞬时通知。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
    /// 成功通知携带完整文本，点击通知时在结果对话框中展示。
    pub full_text: Option<String>,
}

/// 补救建议类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    Key,
    Permission,
    FileType,
    Generic,
}

impl Remediation {
    pub fn for_error(error: &RecognitionError) -> Self {
        match error {
            RecognitionError::MissingKey | RecognitionError::InvalidKey(_) => Self::Key,
            RecognitionError::ClipboardPermissionDenied(_)
            | RecognitionError::ClipboardDataError(_)
            | RecognitionError::ClipboardUnsupported(_)
            | RecognitionError::ClipboardWrite(_) => Self::Permission,
            RecognitionError::UnsupportedFileType(_)
            | RecognitionError::ImageTooLarge { .. }
            | RecognitionError::EmptyImage => Self::FileType,
            _ => Self::Generic,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Key => {
                "请到 https://ocr.space/ocrapi/freekey 免费申请 API Key，\
                 然后在托盘菜单「设置 API Key」中填写。"
            }
            Self::Permission => {
                "请确认系统允许本程序访问剪贴板（macOS：系统设置 → 隐私与安全性；\
                 Linux：确认 X11/Wayland 会话可用），然后重新截图再试。"
            }
            Self::FileType => {
                "请使用系统截图工具重新截取（PNG / JPG），\
                 并控制截图区域，使图片小于 1 MB。"
            }
            Self::Generic => "请稍后重试；如问题持续，请检查网络连接或 OCR.space 服务状态。",
        }
    }
}

/// 阻塞错误对话框。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
    pub remediation: Remediation,
}

impl ErrorDialog {
    pub fn from_error(error: &RecognitionError) -> Self {
        let remediation = Remediation::for_error(error);
        Self {
            title: "OCR 识别失败".to_string(),
            message: format!("{}\n\n{}", error, remediation.text()),
            remediation,
        }
    }
}

/// 具体 UI 的能力集合。
pub trait ResultView {
    /// 写入剪贴板。系统剪贴板调用会阻塞，实现方应自行移出异步线程。
    fn write_clipboard(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<(), RecognitionError>> + Send;

    /// 展示瞬时通知。
    fn notify(&self, notice: Notice);

    /// 展示阻塞错误对话框。
    fn show_error_dialog(&self, dialog: ErrorDialog);
}

/// 截取前 `PREVIEW_CHARS` 个字符，超出时追加省略号。
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

/// 成功通知。
pub fn success_notice(text: &str) -> Notice {
    Notice {
        kind: NoticeKind::Success,
        title: "OCR 完成".to_string(),
        body: format!("已复制 {} 个字符：{}", text.chars().count(), preview(text)),
        full_text: Some(text.to_string()),
    }
}

/// 错误通知：只展示第一行。
pub fn error_notice(error: &RecognitionError) -> Notice {
    let kind = match error {
        RecognitionError::Busy => NoticeKind::Info,
        _ => NoticeKind::Error,
    };
    Notice {
        kind,
        title: "OCR 出错了".to_string(),
        body: error.summary(),
        full_text: None,
    }
}

/// 结果展示器。
pub struct Presenter<V> {
    view: V,
    error_dialog_delay: Duration,
}

impl<V: ResultView> Presenter<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            error_dialog_delay: ERROR_DIALOG_DELAY,
        }
    }

    /// 调整通知与对话框的间隔（测试中设为 0）。
    pub fn with_error_dialog_delay(mut self, delay: Duration) -> Self {
        self.error_dialog_delay = delay;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// 展示成功结果：写剪贴板后通知。写入失败时返回错误，由调用方走错误展示。
    pub async fn present(&self, result: &RecognitionResult) -> Result<(), RecognitionError> {
        self.view.write_clipboard(&result.text).await?;
        log::info!("📋 已写入剪贴板 - {} 个字符", result.text.chars().count());
        self.view.notify(success_notice(&result.text));
        Ok(())
    }

    /// 展示错误：先通知第一行，延迟后弹出完整对话框。
    pub async fn present_error(&self, error: &RecognitionError) {
        log::warn!("❌ 识别失败: {}", error.summary());
        self.view.notify(error_notice(error));

        if !error.wants_dialog() {
            return;
        }
        if !self.error_dialog_delay.is_zero() {
            tokio::time::sleep(self.error_dialog_delay).await;
        }
        self.view.show_error_dialog(ErrorDialog::from_error(error));
    }
}
