//! 配置存储模块
//!
//! # 设计思路
//!
//! 持久化唯一的用户密钥 `OCR_API_KEY`（以及“识别前确认”偏好），
//! 保存在应用数据目录下的 `ocr-config.json`，进程重启后依然有效。
//! 这里不做任何格式校验，Key 是否合法由识别客户端判断。
//!
//! # 实现思路
//!
//! - `ConfigStore` 只持有文件路径，每次 `get` 都重新读取，避免“设置 Key”后读到旧值。
//! - 文件不存在视为空配置；文件损坏或无法读写统一报 `AppError::Storage`。
//! - 对外命令从不返回完整 Key，只返回脱敏后的展示值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager, Runtime, State};

use crate::error::AppError;
use crate::service::OcrServiceState;

const CONFIG_FILE_NAME: &str = "ocr-config.json";

/// 持久化内容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrPreferences {
    #[serde(rename = "OCR_API_KEY", default)]
    pub api_key: String,
    /// 识别前是否弹出确认框。
    #[serde(default)]
    pub confirm_before_recognize: bool,
}

/// 配置存储。
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

fn load_from_path(path: &Path) -> Result<OcrPreferences, AppError> {
    if !path.exists() {
        return Ok(OcrPreferences::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("解析配置文件失败: {}", e)))
}

fn save_to_path(path: &Path, prefs: &OcrPreferences) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::Storage(format!("创建配置目录失败: {}", e)))?;
    }

    let content = serde_json::to_string_pretty(prefs)
        .map_err(|e| AppError::Storage(format!("序列化配置失败: {}", e)))?;
    fs::write(path, content)
        .map_err(|e| AppError::Storage(format!("写入配置文件失败: {}", e)))
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用应用数据目录下的默认配置文件。
    pub fn for_app<R: Runtime>(app: &AppHandle<R>) -> Result<Self, AppError> {
        let app_data_dir = app
            .path()
            .app_data_dir()
            .map_err(|e| AppError::Storage(format!("获取应用数据目录失败: {}", e)))?;
        Ok(Self::new(app_data_dir.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<OcrPreferences, AppError> {
        load_from_path(&self.path)
    }

    /// 读取 API Key，未设置时返回空字符串。
    pub fn get(&self) -> Result<String, AppError> {
        Ok(self.load()?.api_key)
    }

    /// 保存新的 API Key（去掉首尾空白）。
    pub fn set(&self, new_key: &str) -> Result<(), AppError> {
        let mut prefs = self.load()?;
        prefs.api_key = new_key.trim().to_string();
        save_to_path(&self.path, &prefs)?;
        log::info!("🔑 已保存 API Key: {}", mask_key(&prefs.api_key));
        Ok(())
    }

    /// 清除 API Key。
    pub fn clear(&self) -> Result<(), AppError> {
        let mut prefs = self.load()?;
        prefs.api_key.clear();
        save_to_path(&self.path, &prefs)?;
        log::info!("🔑 已清除 API Key");
        Ok(())
    }

    /// 设置面板“保存”：Key 输入为空时保留已有 Key，只更新偏好。
    ///
    /// 清除 Key 只能通过 [`ConfigStore::clear`]。
    pub fn save_preferences(
        &self,
        key_input: &str,
        confirm_before_recognize: bool,
    ) -> Result<OcrPreferences, AppError> {
        let mut prefs = self.load()?;
        let key = key_input.trim();
        if !key.is_empty() {
            prefs.api_key = key.to_string();
            log::info!("🔑 已保存 API Key: {}", mask_key(&prefs.api_key));
        }
        prefs.confirm_before_recognize = confirm_before_recognize;
        save_to_path(&self.path, &prefs)?;
        Ok(prefs)
    }

    pub fn set_confirm_before_recognize(&self, enabled: bool) -> Result<(), AppError> {
        let mut prefs = self.load()?;
        prefs.confirm_before_recognize = enabled;
        save_to_path(&self.path, &prefs)
    }
}

/// 日志与界面展示用的脱敏 Key：只保留首尾各 2 个字符。
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    match chars.len() {
        0 => "(未设置)".to_string(),
        1..=4 => "*".repeat(chars.len()),
        n => {
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[n - 2..].iter().collect();
            format!("{}{}{}", head, "*".repeat(n - 4), tail)
        }
    }
}

/// 前端展示用的 Key 状态。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyStatus {
    pub configured: bool,
    pub masked: String,
    pub confirm_before_recognize: bool,
}

impl From<&OcrPreferences> for ApiKeyStatus {
    fn from(prefs: &OcrPreferences) -> Self {
        Self {
            configured: !prefs.api_key.is_empty(),
            masked: mask_key(&prefs.api_key),
            confirm_before_recognize: prefs.confirm_before_recognize,
        }
    }
}

/// 通过命令设置的新 Key 不能为空。
fn non_blank_key(key: &str) -> Result<&str, AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::InvalidInput(
            "API Key 不能为空；如需清除请使用「清除 Key」".to_string(),
        ));
    }
    Ok(key)
}

#[tauri::command]
pub fn get_api_key_status(state: State<'_, OcrServiceState>) -> Result<ApiKeyStatus, AppError> {
    let prefs = state.store().load()?;
    Ok(ApiKeyStatus::from(&prefs))
}

#[tauri::command]
pub fn set_api_key(state: State<'_, OcrServiceState>, key: String) -> Result<(), AppError> {
    state.store().set(non_blank_key(&key)?)
}

/// 设置面板“保存”按钮：Key 留空表示不修改。
#[tauri::command]
pub fn save_ocr_preferences(
    state: State<'_, OcrServiceState>,
    key: String,
    confirm_before_recognize: bool,
) -> Result<ApiKeyStatus, AppError> {
    let prefs = state.store().save_preferences(&key, confirm_before_recognize)?;
    Ok(ApiKeyStatus::from(&prefs))
}

#[tauri::command]
pub fn clear_api_key(state: State<'_, OcrServiceState>) -> Result<(), AppError> {
    state.store().clear()
}

#[tauri::command]
pub fn set_confirm_before_recognize(
    state: State<'_, OcrServiceState>,
    enabled: bool,
) -> Result<(), AppError> {
    state.store().set_confirm_before_recognize(enabled)
}
