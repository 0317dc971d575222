// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 剪贴板 OCR 应用入口
//!
//! 本文件仅负责应用初始化、托盘菜单、快捷键与命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use clipboard_ocr::{commands, ocr, service, settings, shortcut};
use tauri::Manager;
use tauri::image::Image;
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::TrayIconBuilder;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tauri_plugin_global_shortcut::GlobalShortcutExt;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(
            tauri_plugin_global_shortcut::Builder::new()
                .with_handler(shortcut::handle_shortcut)
                .build(),
        )
        .plugin(tauri_plugin_dialog::init())
        // 应用设置
        .setup(|app| {
            log::info!("setup: begin");
            let app_icon = Image::from_bytes(include_bytes!("../icons/icon.png"))?;

            // 识别服务：客户端 + 配置存储
            let handle = app.handle().clone();
            let service = settings::ConfigStore::for_app(&handle)
                .map_err(|err| format!("配置存储不可用: {err}"))
                .and_then(|store| {
                    let client = ocr::OcrClient::new(ocr::OcrConfig::default())
                        .map_err(|err| format!("识别客户端创建失败: {err}"))?;
                    log::info!("setup: 配置文件 {}", store.path().display());
                    Ok(service::OcrServiceState::new(client, store))
                });
            match service {
                Ok(state) => {
                    app.manage(state);
                }
                Err(reason) => {
                    // 不中断启动：托盘与帮助仍可用，触发识别时再次提示
                    log::error!("setup: {reason}");
                    app.dialog()
                        .message(commands::unavailable_message(Some(&reason)))
                        .title("OCR 一键识别")
                        .kind(MessageDialogKind::Error)
                        .show(|_| {});
                    app.manage(commands::StartupFailure(reason));
                }
            }

            // Alt+Q（注册失败不影响托盘菜单入口）
            if let Err(err) = app.global_shortcut().register(shortcut::recognize_shortcut()) {
                log::warn!("setup: 注册 Alt+Q 失败，请使用托盘菜单触发识别: {err}");
            }

            // 托盘菜单
            let recognize_i = MenuItem::with_id(app, "recognize", "识别剪贴板图片 (Alt+Q)", true, None::<&str>)?;
            let set_key_i = MenuItem::with_id(app, "set_key", "设置 API Key", true, None::<&str>)?;
            let help_i = MenuItem::with_id(app, "help", "帮助", true, None::<&str>)?;
            let separator = PredefinedMenuItem::separator(app)?;
            let quit_i = MenuItem::with_id(app, "quit", "退出", true, None::<&str>)?;
            let menu = Menu::with_items(app, &[&recognize_i, &set_key_i, &help_i, &separator, &quit_i])?;

            let tray_result = TrayIconBuilder::new()
                .icon(app_icon)
                .tooltip("剪贴板 OCR（Alt+Q）")
                .menu(&menu)
                .on_menu_event(|app, event| match event.id.as_ref() {
                    "recognize" => commands::trigger_recognition(app),
                    "set_key" => commands::open_settings(app),
                    "help" => commands::show_help(app),
                    "quit" => {
                        if let Err(err) = app.global_shortcut().unregister_all() {
                            log::warn!("退出前清理全局快捷键失败: {err}");
                        }
                        app.exit(0);
                    }
                    _ => {}
                })
                .build(app);

            // 托盘不可用时直接打开设置窗口，避免进程在后台无入口
            if let Err(err) = tray_result {
                log::warn!("托盘图标创建失败，回退为显示主窗口: {err}");
                commands::open_settings(app.handle());
            }

            log::info!("setup: complete");
            Ok(())
        })
        // 窗口关闭时隐藏而非退出
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::CloseRequested { api, .. } = event {
                if let Err(err) = window.hide() {
                    log::warn!("窗口关闭转隐藏失败: {err}");
                }
                api.prevent_close();
            }
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 识别
            commands::recognize_clipboard,
            commands::copy_text,
            commands::hide_main_window,
            // 配置
            settings::get_api_key_status,
            settings::set_api_key,
            settings::save_ocr_preferences,
            settings::clear_api_key,
            settings::set_confirm_before_recognize,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
