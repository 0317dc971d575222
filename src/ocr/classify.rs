//! # 服务端错误分类
//!
//! ## 设计思路
//!
//! 服务端只返回人类可读的错误消息。这里维护一张“已知错误表”，
//! 每条规则是一个忽略大小写的正则与对应分类。未命中的消息一律视为
//! 普通服务错误，绝不会误触发文件类型回退。
//!
//! 规则按顺序匹配，先命中者生效。

use once_cell::sync::Lazy;
use regex::Regex;

/// 已知服务端错误的分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerErrorClass {
    /// Key 无效或未授权。
    InvalidKey,
    /// 超出调用频率或配额。
    RateLimited,
    /// 服务端无法判断上传文件的类型，需要走 Base64 回退。
    UnsupportedFileType,
}

struct KnownServerError {
    pattern: Regex,
    class: ServerErrorClass,
}

fn rule(pattern: &str, class: ServerErrorClass) -> Option<KnownServerError> {
    match Regex::new(pattern) {
        Ok(pattern) => Some(KnownServerError { pattern, class }),
        Err(err) => {
            log::error!("内置错误规则编译失败 {}: {}", pattern, err);
            None
        }
    }
}

static KNOWN_SERVER_ERRORS: Lazy<Vec<KnownServerError>> = Lazy::new(|| {
    [
        rule(r"(?i)unable to recognize (the )?file ?type", ServerErrorClass::UnsupportedFileType),
        rule(r"(?i)\bE216\b", ServerErrorClass::UnsupportedFileType),
        rule(r"(?i)file extension", ServerErrorClass::UnsupportedFileType),
        rule(r"(?i)api ?key", ServerErrorClass::InvalidKey),
        rule(r"(?i)\b(invalid|wrong) key\b", ServerErrorClass::InvalidKey),
        rule(r"(?i)unauthori[sz]ed", ServerErrorClass::InvalidKey),
        rule(r"(?i)rate limit", ServerErrorClass::RateLimited),
        rule(r"(?i)(maximum|max) number of (requests|calls)", ServerErrorClass::RateLimited),
        rule(r"(?i)too many requests", ServerErrorClass::RateLimited),
    ]
    .into_iter()
    .flatten()
    .collect()
});

/// 对服务端错误消息分类，未知消息返回 `None`。
///
/// # 示例
/// ```rust
/// use clipboard_ocr::ocr::{classify_server_error, ServerErrorClass};
///
/// assert_eq!(
///     classify_server_error("Unable to recognize the file type"),
///     Some(ServerErrorClass::UnsupportedFileType)
/// );
/// assert_eq!(classify_server_error("Timed out waiting for results"), None);
/// ```
pub fn classify_server_error(message: &str) -> Option<ServerErrorClass> {
    KNOWN_SERVER_ERRORS
        .iter()
        .find(|known| known.pattern.is_match(message))
        .map(|known| known.class)
}
