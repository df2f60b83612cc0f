// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::crawl_service::CrawlService;
use crate::domain::services::summary::CrawlTaskResult;
use crate::utils::errors::CrawlerError;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info};

/// 工作管理器
///
/// 把每个域名分发为一个爬取任务，在固定大小的任务池内并发
/// 执行，并按输入顺序收集所有结果。任务之间除去重映射和
/// 进度计数外没有共享状态。
pub struct WorkerManager {
    service: Arc<CrawlService>,
    pool_size: usize,
}

impl WorkerManager {
    /// 创建新的工作管理器
    ///
    /// # 参数
    ///
    /// * `service` - 爬取服务实例
    /// * `pool_size` - 并发任务数，缺省为可用CPU核数的2倍
    pub fn new(service: Arc<CrawlService>, pool_size: Option<usize>) -> Self {
        let pool_size = pool_size.unwrap_or_else(default_pool_size).max(1);
        Self { service, pool_size }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// 爬取整个域名列表
    ///
    /// 每个域名派生一个独立任务；单个任务的意外失败只影响
    /// 自己的结果条目，不会中断其余域名。
    ///
    /// # 参数
    ///
    /// * `domains` - 按输入顺序排列的域名列表
    ///
    /// # 返回值
    ///
    /// 与输入顺序一一对应的任务结果列表
    pub async fn run(&self, domains: Vec<String>) -> Vec<CrawlTaskResult> {
        info!(
            "Crawling {} domains with pool size {}",
            domains.len(),
            self.pool_size
        );

        stream::iter(domains)
            .map(|domain| {
                let service = self.service.clone();
                async move {
                    let task_domain = domain.clone();
                    let handle =
                        tokio::spawn(async move { service.crawl(&task_domain).await });
                    match handle.await {
                        Ok(result) => {
                            if let Err(ref e) = result {
                                error!("Crawl task failed: {}", e);
                            }
                            result
                        }
                        Err(join_error) => {
                            error!("Crawl task for {} aborted: {}", domain, join_error);
                            Err(CrawlerError::TaskAborted {
                                domain,
                                reason: join_error.to_string(),
                            })
                        }
                    }
                }
            })
            .buffered(self.pool_size)
            .collect()
            .await
    }
}

/// 缺省任务池大小：可用CPU核数的2倍
pub fn default_pool_size() -> usize {
    std::thread::available_parallelism()
        .map(|cores| cores.get() * 2)
        .unwrap_or(2)
}
