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

use crate::utils::text_extractor::strip_text;
use anyhow::{Context, Result};
use regex::RegexBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// 构建基准语料字符串
///
/// 读取基准语料目录中的每个HTML文件（人工核验过的隐私政策），
/// 提取可见文本并去除各自的机构名（取文件名主干），再以空格
/// 结尾逐个拼接成一个大字符串。整个进程启动时构建一次，
/// 之后只读共享给所有爬取任务。
///
/// # 参数
///
/// * `dir` - 基准语料HTML目录
///
/// # 返回值
///
/// * `Ok(String)` - 拼接完成的基准语料
/// * `Err(anyhow::Error)` - 目录或文件读取失败
pub fn build(dir: &Path) -> Result<String> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading ground truth dir {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    // directory listing order is platform-defined, sort for a stable corpus
    paths.sort();

    let mut ground_truth = String::new();
    for path in paths {
        let bytes =
            fs::read(&path).with_context(|| format!("reading policy {}", path.display()))?;
        let html = String::from_utf8_lossy(&bytes);
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        ground_truth.push_str(&remove_company_names(&strip_text(&html), &name));
        ground_truth.push(' ');
    }
    Ok(ground_truth)
}

/// 去除文本中的机构名
///
/// 政策总会反复提及自家机构名和专有服务名，这些高频专名会
/// 扭曲相似度评分，替换为空格。匹配不区分大小写。
pub fn remove_company_names(contents: &str, name: &str) -> String {
    if name.is_empty() {
        return contents.to_string();
    }
    match RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(contents, " ").into_owned(),
        Err(_) => contents.to_string(),
    }
}
