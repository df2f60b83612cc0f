// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 爬取任务错误类型
///
/// 仅用于无法在任务内部恢复的意外失败；不可达域名、
/// 空页面、非英语内容和重复文本都作为结果数据记录，
/// 不属于错误。
#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("策略产物写入失败 ({domain}): {source}")]
    PolicyPersist {
        domain: String,
        #[source]
        source: std::io::Error,
    },

    #[error("爬取任务异常终止 ({domain}): {reason}")]
    TaskAborted { domain: String, reason: String },
}

impl CrawlerError {
    /// 错误关联的域名，用于汇总报告
    pub fn domain(&self) -> &str {
        match self {
            CrawlerError::PolicyPersist { domain, .. } => domain,
            CrawlerError::TaskAborted { domain, .. } => domain,
        }
    }
}
