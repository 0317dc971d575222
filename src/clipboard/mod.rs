//! 剪贴板模块
//!
//! # 设计思路
//!
//! 识别链路只关心两件事：
//! - **读**：从剪贴板快照里挑出第一张可用图片（`reader`）
//! - **写**：把识别出的文字写回剪贴板（`writer`）
//!
//! 快照来源抽象为 `ClipboardSource`，系统实现（`system`）基于 `arboard`，
//! 测试可以用 `SnapshotItem` 直接构造任意快照。
//!
//! # 实现思路
//!
//! - 每个剪贴板条目暴露若干 MIME 类型，按类型按需取字节（`ClipboardItem`）。
//! - 平台错误先归一为 `ClipboardAccessError`，再由读取器映射到识别错误。

pub mod reader;
pub mod system;
pub mod writer;

pub use reader::{IMAGE_TYPE_PREFERENCE, read_image};
pub use system::SystemClipboard;

use crate::ocr::RecognitionError;

/// 从剪贴板取出的图片：原始字节 + MIME 类型。
///
/// 只存在于一次识别调用期间，由读取器创建、交给识别客户端消费。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// 平台剪贴板访问错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardAccessError {
    #[error("权限被拒绝：{0}")]
    PermissionDenied(String),

    #[error("数据读取失败：{0}")]
    DataError(String),

    #[error("不支持的环境：{0}")]
    Unsupported(String),
}

impl From<ClipboardAccessError> for RecognitionError {
    fn from(error: ClipboardAccessError) -> Self {
        match error {
            ClipboardAccessError::PermissionDenied(msg) => Self::ClipboardPermissionDenied(msg),
            ClipboardAccessError::DataError(msg) => Self::ClipboardDataError(msg),
            ClipboardAccessError::Unsupported(msg) => Self::ClipboardUnsupported(msg),
        }
    }
}

/// 剪贴板中的一个条目。
pub trait ClipboardItem {
    /// 条目提供的全部 MIME 类型。
    fn types(&self) -> Vec<String>;

    /// 以指定类型取出字节。
    fn get_type(&self, media_type: &str) -> Result<Vec<u8>, ClipboardAccessError>;
}

/// 剪贴板快照来源。
pub trait ClipboardSource {
    type Item: ClipboardItem;

    /// 枚举当前剪贴板条目。
    fn read(&mut self) -> Result<Vec<Self::Item>, ClipboardAccessError>;
}

/// 已经物化的剪贴板条目，类型与字节一一对应。
#[derive(Debug, Clone, Default)]
pub struct SnapshotItem {
    entries: Vec<(String, Result<Vec<u8>, ClipboardAccessError>)>,
}

impl SnapshotItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一种类型的数据。
    pub fn with(mut self, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries.push((media_type.into(), Ok(bytes.into())));
        self
    }

    /// 追加一种声明了类型但读取会失败的数据。
    pub fn with_failure(mut self, media_type: impl Into<String>, error: ClipboardAccessError) -> Self {
        self.entries.push((media_type.into(), Err(error)));
        self
    }
}

impl ClipboardItem for SnapshotItem {
    fn types(&self) -> Vec<String> {
        self.entries.iter().map(|(t, _)| t.clone()).collect()
    }

    fn get_type(&self, media_type: &str) -> Result<Vec<u8>, ClipboardAccessError> {
        self.entries
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(media_type))
            .map(|(_, data)| data.clone())
            .unwrap_or_else(|| {
                Err(ClipboardAccessError::DataError(format!("条目不包含 {}", media_type)))
            })
    }
}

/// 固定快照，主要用于测试与离线调用。
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard {
    pub items: Vec<SnapshotItem>,
}

impl ClipboardSource for StaticClipboard {
    type Item = SnapshotItem;

    fn read(&mut self) -> Result<Vec<Self::Item>, ClipboardAccessError> {
        Ok(self.items.clone())
    }
}
