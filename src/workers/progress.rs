// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// 共享进度跟踪器
///
/// 所有爬取任务共享的完成计数，每个域名完成时恰好递增一次。
/// 仅用于进度展示，不参与结果的正确性。
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// 标记一个域名完成并输出进度
    ///
    /// 递增并读取在同一个原子操作内完成，并发完成时
    /// 每个任务看到的计数各不相同。
    pub fn complete(&self, domain: &str) {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "Crawling progress: {}/{} ({} done)",
            done, self.total, domain
        );
    }

    /// 已完成的域名数量
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
