// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// 跨域名文本去重器
///
/// 维护提取文本到首个登记域名的共享映射。不同站点经常
/// 挂载完全相同的政策文档（例如同一集团的多个域名），
/// 同一份文本只允许第一个域名持久化。
///
/// 检查和登记在同一个分片锁临界区内完成，并发任务对同一
/// 文本的竞争恰好只有一个胜出。
#[derive(Default)]
pub struct DuplicateDetector {
    /// 提取文本 -> 首个登记该文本的域名
    seen: DashMap<String, String>,
}

impl DuplicateDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 检查文本是否重复，未见过时登记归属域名
    ///
    /// # 参数
    ///
    /// * `contents` - 提取文本（逐字节比较）
    /// * `domain` - 当前域名
    ///
    /// # 返回值
    ///
    /// 首次见到该文本返回false并登记，此后完全相同的文本返回true
    pub fn is_duplicate(&self, contents: &str, domain: &str) -> bool {
        match self.seen.entry(contents.to_string()) {
            Entry::Occupied(_) => true,
            Entry::Vacant(vacant) => {
                vacant.insert(domain.to_string());
                false
            }
        }
    }

    /// 首个登记该文本的域名
    pub fn owner(&self, contents: &str) -> Option<String> {
        self.seen.get(contents).map(|entry| entry.value().clone())
    }

    /// 已登记的不同文本数量
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
