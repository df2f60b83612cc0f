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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含输入数据、爬虫行为、抓取引擎、输出路径和任务池等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 输入数据配置
    pub inputs: InputSettings,
    /// 爬虫行为配置
    pub crawler: CrawlerSettings,
    /// 抓取引擎配置
    pub engine: EngineSettings,
    /// 输出路径配置
    pub output: OutputSettings,
    /// 任务池配置
    #[serde(default)]
    pub pool: PoolSettings,
}

/// 输入数据配置设置
#[derive(Debug, Deserialize)]
pub struct InputSettings {
    /// 域名列表JSON文件路径（对象的值为域名，保持输入顺序）
    pub domain_list_file: String,
    /// 基准语料HTML目录（人工核验过的隐私政策）
    pub ground_truth_dir: String,
    /// 英语词典文件路径（按行分隔的词表）
    pub dictionary_file: String,
    /// 爬取的域名数量上限，缺省爬取整个列表
    pub num_domains: Option<usize>,
}

/// 爬虫行为配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlerSettings {
    /// 判定为隐私政策的最小余弦相似度
    pub cos_sim_threshold: f64,
    /// 每个域名允许的链接发现扩展次数
    pub max_crawler_depth: u32,
    /// 链接筛选关键词列表
    pub policy_keywords: Vec<String>,
}

/// 抓取引擎配置设置
#[derive(Debug, Deserialize)]
pub struct EngineSettings {
    /// 单次请求超时时间（秒）
    pub request_timeout: u64,
    /// 是否在HTTP抓取失败后回退到浏览器引擎
    pub browser_fallback: bool,
}

/// 输出路径配置设置
#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    /// 原始HTML产物输出目录
    pub html_dir: String,
    /// 提取文本产物输出目录
    pub text_dir: String,
    /// 汇总报告输出文件路径
    pub summary_file: String,
}

/// 任务池配置设置
#[derive(Debug, Default, Deserialize)]
pub struct PoolSettings {
    /// 并发爬取任务数，缺省为可用CPU核数的2倍
    pub size: Option<usize>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default input settings
            .set_default("inputs.domain_list_file", "./data/domains.json")?
            .set_default("inputs.ground_truth_dir", "./data/ground_truth")?
            .set_default("inputs.dictionary_file", "./data/dictionary.txt")?
            // Default crawler settings
            .set_default("crawler.cos_sim_threshold", 0.6)?
            .set_default("crawler.max_crawler_depth", 2)?
            .set_default("crawler.policy_keywords", vec!["privacy".to_string()])?
            // Default engine settings
            .set_default("engine.request_timeout", 30)?
            .set_default("engine.browser_fallback", true)?
            // Default output settings
            .set_default("output.html_dir", "./output/html")?
            .set_default("output.text_dir", "./output/text")?
            .set_default("output.summary_file", "./output/summary.txt")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("POLICRAWL").separator("__"));

        builder.build()?.try_deserialize()
    }
}
