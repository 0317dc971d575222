//! # 识别错误模型
//!
//! ## 设计思路
//!
//! 一次识别调用最多只会浮现一个错误，所有阶段（剪贴板读取、参数预检、
//! 网络请求、服务端返回、结果写回）的失败都收敛到 `RecognitionError`。
//! 展示层只依赖枚举分支决定补救提示，不再对人类可读文案做子串匹配。
//!
//! 错误文案的第一行是“短摘要”（用于瞬时通知），其余行是补充说明
//! （只在阻塞对话框里完整展示）。

/// 识别链路统一错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("尚未设置 OCR API Key\n请在托盘菜单「设置 API Key」中填写 OCR.space 的免费 Key。")]
    MissingKey,

    #[error("API Key 无效：{0}")]
    InvalidKey(String),

    #[error("剪贴板里没有图片！\n请先截图（Win+Shift+S 或 Cmd+Shift+4）再按 Alt+Q。")]
    NoImage,

    #[error("图片过大：{size} 字节（限制：{limit} 字节）\n请缩小截图区域后重试。")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("剪贴板图片内容为空")]
    EmptyImage,

    #[error("无法识别的图片文件类型：{0}\n已尝试以 Base64 方式重新上传，服务端仍无法识别。请改用 PNG 或 JPG 截图后重试。")]
    UnsupportedFileType(String),

    #[error("OCR 请求超时（{0} 秒）")]
    Timeout(u64),

    #[error("OCR 服务错误：{0}")]
    ServerError(String),

    #[error("OCR 服务请求过于频繁：{0}\n免费 Key 有调用频率限制，请稍后再试。")]
    RateLimited(String),

    #[error("网络错误：{0}")]
    Network(String),

    #[error("没有读取剪贴板的权限：{0}")]
    ClipboardPermissionDenied(String),

    #[error("读取剪贴板数据失败（DataError）：{0}")]
    ClipboardDataError(String),

    #[error("当前环境不支持读取剪贴板：{0}")]
    ClipboardUnsupported(String),

    #[error("未识别到文字")]
    EmptyResult,

    #[error("写入剪贴板失败：{0}")]
    ClipboardWrite(String),

    #[error("上一次识别仍在进行中，请稍候")]
    Busy,

    #[error("读取配置失败：{0}")]
    Storage(String),
}

impl RecognitionError {
    /// 通知用的短摘要：只取第一行。
    pub fn summary(&self) -> String {
        let message = self.to_string();
        message.lines().next().unwrap_or_default().to_string()
    }

    /// 是否需要在通知之后再弹出阻塞对话框。
    ///
    /// `Busy` 只是提示用户稍等，不值得打断。
    pub fn wants_dialog(&self) -> bool {
        !matches!(self, Self::Busy)
    }
}
