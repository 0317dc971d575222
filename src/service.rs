//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `OcrServiceState` 作为 Tauri 注入状态，持有识别客户端与配置存储，
//! 串起“读剪贴板 → 识别 → 展示”整条链路。
//!
//! 链路拆成两段：
//! - `capture`：占用槽位并读取剪贴板图片（没有图片直接 `NoImage`）
//! - `finish`：读取 Key、识别、展示
//!
//! 两段之间可以插入“识别前确认”，确认框出现时图片已经确实存在。
//!
//! ## 实现思路
//!
//! - API Key 每次调用时从 `ConfigStore` 重新读取并显式传入客户端，
//!   “设置 Key”之后的下一次识别立即生效。
//! - `InFlightGuard` 采用 RAII 模式占用单槽：识别进行中再次触发直接拒绝（`Busy`），
//!   不排队；守卫离开作用域时自动释放，即使中途出错、用户取消或 future 被丢弃。
//! - 剪贴板快照读取（含 PNG 编码）放到 `spawn_blocking`，不阻塞异步运行时。
//! - 记录 `read/recognize/present/total` 阶段耗时，便于排查慢请求。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::clipboard::{ClipboardImage, ClipboardSource, read_image};
use crate::ocr::{OcrClient, RecognitionError, RecognitionResult};
use crate::present::{Presenter, ResultView};
use crate::settings::ConfigStore;

/// 识别进行中的单槽占用守卫。
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    /// 尝试占用；已被占用时返回 `None`。
    pub fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// 已占用槽位并取到图片的一次识别。丢弃即释放槽位。
pub struct Capture {
    _guard: InFlightGuard,
    image: ClipboardImage,
    started: Instant,
}

impl Capture {
    pub fn image(&self) -> &ClipboardImage {
        &self.image
    }
}

/// 识别服务状态。
pub struct OcrServiceState {
    client: OcrClient,
    store: ConfigStore,
    in_flight: Arc<AtomicBool>,
}

impl OcrServiceState {
    pub fn new(client: OcrClient, store: ConfigStore) -> Self {
        Self {
            client,
            store,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn client(&self) -> &OcrClient {
        &self.client
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 占用识别槽位。
    pub fn try_begin(&self) -> Result<InFlightGuard, RecognitionError> {
        InFlightGuard::try_acquire(&self.in_flight).ok_or(RecognitionError::Busy)
    }

    /// 第一段：占用槽位并读取剪贴板图片，不涉及展示。
    pub async fn capture<S>(&self, source: S) -> Result<Capture, RecognitionError>
    where
        S: ClipboardSource + Send + 'static,
    {
        let guard = self.try_begin().inspect_err(|_| {
            log::info!("⏳ 识别进行中，忽略重复触发");
        })?;

        let started = Instant::now();
        let mut source = source;
        let image = tokio::task::spawn_blocking(move || read_image(&mut source))
            .await
            .map_err(|e| RecognitionError::ClipboardDataError(format!("线程执行失败：{}", e)))??
            .ok_or(RecognitionError::NoImage)?;
        log::debug!("⏱️ 阶段耗时 - read: {:?}", started.elapsed());

        Ok(Capture {
            _guard: guard,
            image,
            started,
        })
    }

    /// 第二段：读取 Key、识别并展示结果或错误。
    pub async fn finish<V: ResultView>(
        &self,
        capture: Capture,
        presenter: &Presenter<V>,
    ) -> Result<RecognitionResult, RecognitionError> {
        let outcome = self.recognize_and_present(&capture, presenter).await;

        if let Err(err) = &outcome {
            presenter.present_error(err).await;
        }

        log::info!("⏱️ 本次识别总耗时 {:?}", capture.started.elapsed());
        outcome
    }

    async fn recognize_and_present<V: ResultView>(
        &self,
        capture: &Capture,
        presenter: &Presenter<V>,
    ) -> Result<RecognitionResult, RecognitionError> {
        let api_key = self.store.get()?;

        let t0 = Instant::now();
        let result = self.client.recognize(&capture.image, &api_key).await?;
        let recognize_cost = t0.elapsed();

        let t1 = Instant::now();
        presenter.present(&result).await?;
        log::debug!(
            "⏱️ 阶段耗时 - recognize: {:?}, present: {:?}",
            recognize_cost,
            t1.elapsed()
        );
        Ok(result)
    }

    /// 完整执行一次识别并展示结果或错误。
    pub async fn run<S, V>(
        &self,
        source: S,
        presenter: &Presenter<V>,
    ) -> Result<RecognitionResult, RecognitionError>
    where
        S: ClipboardSource + Send + 'static,
        V: ResultView,
    {
        let capture = match self.capture(source).await {
            Ok(capture) => capture,
            Err(err) => {
                presenter.present_error(&err).await;
                return Err(err);
            }
        };
        self.finish(capture, presenter).await
    }
}
