// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, ScraperEngine};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 引擎路由器
///
/// 按支持分数从高到低尝试各个抓取引擎，失败时回退到下一个。
/// 典型配置是reqwest优先、浏览器引擎兜底。
pub struct EngineRouter {
    /// 引擎列表
    engines: Vec<Arc<dyn ScraperEngine>>,
    /// 缺省请求超时
    request_timeout: Duration,
}

impl EngineRouter {
    /// 创建新的引擎路由器
    ///
    /// # 参数
    ///
    /// * `engines` - 引擎列表
    /// * `request_timeout` - 单次请求的超时时间
    pub fn new(engines: Vec<Arc<dyn ScraperEngine>>, request_timeout: Duration) -> Self {
        Self {
            engines,
            request_timeout,
        }
    }

    /// 路由请求到合适的引擎
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 第一个成功引擎的抓取响应
    /// * `Err(EngineError)` - 所有引擎都失败
    pub async fn route(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let mut candidates: Vec<(u8, &Arc<dyn ScraperEngine>)> = self
            .engines
            .iter()
            .map(|engine| (engine.support_score(request), engine))
            .filter(|(score, _)| *score > 0)
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        if candidates.is_empty() {
            warn!("No suitable engines available for request");
            return Err(EngineError::AllEnginesFailed);
        }

        let mut last_error = None;
        for (score, engine) in candidates {
            debug!(
                "Trying engine {} with score {} for request to {}",
                engine.name(),
                score,
                request.url
            );
            match engine.fetch(request).await {
                Ok(response) => {
                    debug!(
                        "Engine {} succeeded in {}ms for {}",
                        engine.name(),
                        response.response_time_ms,
                        request.url
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!(
                        "Engine {} failed for {}: {}, trying next engine",
                        engine.name(),
                        request.url,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        warn!("All engines failed for request to {}", request.url);
        Err(last_error.unwrap_or(EngineError::AllEnginesFailed))
    }

    /// 抓取URL内容，失败时返回空字符串
    ///
    /// 爬取流程把空内容作为统一的失败哨兵值处理，
    /// 具体错误只记录日志，不向上传播。
    pub async fn fetch_or_empty(&self, url: &str) -> String {
        let request = FetchRequest::new(url, self.request_timeout);
        match self.route(&request).await {
            Ok(response) => response.content,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                String::new()
            }
        }
    }
}
