// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, ScraperEngine};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

// Global browser instance to avoid re-launching Chrome on every request.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

// Asynchronously gets or initializes the shared browser instance.
// This function ensures that the browser is launched only once.
pub async fn get_browser() -> Result<&'static Browser, EngineError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let remote_debugging_url = std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok();

            let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url).await.map_err(|e| {
                    EngineError::Other(format!("Failed to connect to remote Chrome: {}", e))
                })?
            } else {
                let builder = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(30))
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage");

                Browser::launch(builder.build().map_err(|e| EngineError::Other(e.to_string()))?)
                    .await
                    .map_err(|e| EngineError::Other(e.to_string()))?
            };

            // Spawn a handler to process browser events
            tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// 浏览器引擎
///
/// 基于chromiumoxide实现的浏览器自动化抓取引擎，
/// 用于轻量HTTP请求抓不到内容的JavaScript渲染页面
pub struct BrowserEngine;

#[async_trait]
impl ScraperEngine for BrowserEngine {
    /// 执行浏览器自动化抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应
    /// * `Err(EngineError)` - 抓取过程中出现的错误
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let start = Instant::now();

        // Wrap the entire operation in a timeout
        tokio::time::timeout(request.timeout, async {
            let browser = get_browser().await?;

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            // goto waits for the load event by default
            page.goto(&request.url)
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            let content = page
                .content()
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            let _ = page.close().await;

            // chromiumoxide does not expose the navigation status code on Page
            Ok(FetchResponse {
                status_code: 200,
                content,
                response_time_ms: start.elapsed().as_millis() as u64,
            })
        })
        .await
        .map_err(|_| EngineError::Timeout)?
    }

    /// 计算对请求的支持分数
    ///
    /// # 返回值
    ///
    /// 支持分数（0-100），需要JS的请求返回100分
    fn support_score(&self, request: &FetchRequest) -> u8 {
        if request.needs_js {
            return 100;
        }
        10 // Can do it, but expensive
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "browser"
    }
}
