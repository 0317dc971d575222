//! 全局快捷键（Alt+Q）
//!
//! 只注册 `Alt+Q` 这一个精确组合：全局快捷键按修饰键精确匹配，
//! 同时按住 Ctrl / Meta / Super / Shift 时根本不会命中，排除由注册本身保证。
//! 回调里只需区分“是不是识别快捷键”。

use tauri::AppHandle;
use tauri_plugin_global_shortcut::{Code, Modifiers, Shortcut, ShortcutEvent, ShortcutState};

use crate::commands;

/// 识别快捷键。
pub fn recognize_shortcut() -> Shortcut {
    Shortcut::new(Some(Modifiers::ALT), Code::KeyQ)
}

/// 回调中的快捷键是否为识别快捷键（修饰键必须完全一致）。
pub fn is_recognize_shortcut(shortcut: &Shortcut) -> bool {
    shortcut.mods == Modifiers::ALT && shortcut.key == Code::KeyQ
}

/// 全局快捷键插件的统一回调。
pub fn handle_shortcut(app: &AppHandle, shortcut: &Shortcut, event: ShortcutEvent) {
    if event.state() != ShortcutState::Pressed {
        return;
    }
    if !is_recognize_shortcut(shortcut) {
        log::debug!("忽略非识别快捷键: {:?}", shortcut);
        return;
    }

    log::info!("⌨️ Alt+Q 触发识别");
    commands::trigger_recognition(app);
}
