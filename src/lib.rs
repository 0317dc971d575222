//! # 剪贴板 OCR 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   触发：Alt+Q（shortcut）/ 托盘菜单 / 前端 invoke          │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ commands::trigger_recognition
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  service ── OcrServiceState（单槽 InFlightGuard）          │
//! │       │                                                  │
//! │       ├─ clipboard::read_image   两轮扫描取图片           │
//! │       ├─ settings::ConfigStore   OCR_API_KEY              │
//! │       ├─ ocr::OcrClient          multipart → Base64 回退  │
//! │       └─ present::Presenter      写剪贴板 + 通知 + 对话框 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`clipboard`] | 剪贴板快照抽象、图片读取、文本写回 |
//! | [`ocr`] | 参数预检、请求构造、响应解析、错误分类与回退 |
//! | [`present`] | 与 UI 无关的展示规则 + Tauri 实现 |
//! | [`settings`] | API Key 持久化与相关命令 |
//! | [`service`] | 识别链路编排与并发保护 |
//! | [`shortcut`] | Alt+Q 全局快捷键 |
//! | [`commands`] | 触发入口与前端命令 |

pub mod error;
pub mod clipboard;
pub mod commands;
pub mod ocr;
pub mod present;
pub mod service;
pub mod settings;
pub mod shortcut;
