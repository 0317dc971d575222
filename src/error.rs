//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，所有 `#[tauri::command]` 函数统一返回
//! `Result<T, AppError>`，前端通过 `Serialize` 获得可读的错误信息。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `RecognitionError` / `io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，满足 Tauri IPC 要求。

use serde::Serialize;

use crate::ocr::RecognitionError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 识别链路错误（剪贴板 / 网络 / 服务端 / 写回）
    #[error("{0}")]
    Recognition(#[from] RecognitionError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置存储不可用
    #[error("配置存储不可用: {0}")]
    Storage(String),

    /// 前端传入的参数不合法
    #[error("参数无效: {0}")]
    InvalidInput(String),

    /// 窗口操作失败
    #[error("窗口操作失败: {0}")]
    Window(String),
}

impl From<AppError> for RecognitionError {
    /// 配置读取失败在识别链路里表现为 `Storage`。
    fn from(error: AppError) -> Self {
        match error {
            AppError::Recognition(inner) => inner,
            other => RecognitionError::Storage(other.to_string()),
        }
    }
}

/// Tauri IPC 要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
