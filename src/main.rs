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

use anyhow::Context;
use policrawl::config::settings::Settings;
use policrawl::domain::services::crawl_service::{CrawlContext, CrawlService};
use policrawl::domain::services::duplicate_detector::DuplicateDetector;
use policrawl::domain::services::ground_truth;
use policrawl::domain::services::language_filter::LanguageFilter;
use policrawl::domain::services::similarity::PolicyVerifier;
use policrawl::domain::services::summary;
use policrawl::engines::browser_engine::BrowserEngine;
use policrawl::engines::reqwest_engine::ReqwestEngine;
use policrawl::engines::router::EngineRouter;
use policrawl::engines::traits::ScraperEngine;
use policrawl::utils::fs::mkdir_clean;
use policrawl::utils::telemetry;
use policrawl::workers::manager::WorkerManager;
use policrawl::workers::progress::ProgressTracker;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

/// 读取域名列表JSON文件
///
/// 文件为一个JSON对象，值是域名字符串，保持文件中的顺序。
fn load_domain_list(path: &Path, limit: Option<usize>) -> anyhow::Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading domain list {}", path.display()))?;
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing domain list {}", path.display()))?;
    let mut domains: Vec<String> = object
        .values()
        .filter_map(|value| value.as_str().map(|s| s.to_string()))
        .collect();
    if let Some(limit) = limit {
        domains.truncate(limit);
    }
    Ok(domains)
}

/// 主函数
///
/// 应用程序入口点，加载输入数据、构建共享状态、分发爬取
/// 任务并写出汇总报告
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting policrawl...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Load domain list and prepare output directories
    let domains = load_domain_list(
        Path::new(&settings.inputs.domain_list_file),
        settings.inputs.num_domains,
    )?;
    info!("Loaded {} domains", domains.len());

    let html_outdir = PathBuf::from(&settings.output.html_dir);
    let text_outdir = PathBuf::from(&settings.output.text_dir);
    mkdir_clean(&html_outdir)
        .with_context(|| format!("preparing output dir {}", html_outdir.display()))?;
    mkdir_clean(&text_outdir)
        .with_context(|| format!("preparing output dir {}", text_outdir.display()))?;

    // 4. Build shared read-only state: dictionary and ground truth corpus
    let language_filter = Arc::new(
        LanguageFilter::load(Path::new(&settings.inputs.dictionary_file))
            .with_context(|| format!("loading dictionary {}", settings.inputs.dictionary_file))?,
    );
    let ground_truth = ground_truth::build(Path::new(&settings.inputs.ground_truth_dir))?;
    info!(
        "Ground truth corpus built ({} chars)",
        ground_truth.len()
    );

    // 5. Initialize Engines
    let request_timeout = Duration::from_secs(settings.engine.request_timeout);
    let mut engines: Vec<Arc<dyn ScraperEngine>> = vec![Arc::new(ReqwestEngine)];
    if settings.engine.browser_fallback {
        engines.push(Arc::new(BrowserEngine));
    }
    let router = Arc::new(EngineRouter::new(engines, request_timeout));

    // 6. Build the crawl context shared by every worker task
    let keywords: Vec<String> = settings
        .crawler
        .policy_keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        .collect();
    let ctx = Arc::new(CrawlContext {
        keywords,
        cos_sim_threshold: settings.crawler.cos_sim_threshold,
        max_crawler_depth: settings.crawler.max_crawler_depth,
        html_outdir,
        text_outdir,
        verifier: PolicyVerifier::new(ground_truth, language_filter),
        duplicates: DuplicateDetector::new(),
        progress: ProgressTracker::new(domains.len()),
        router,
    });

    // 7. Fan the domains out over the worker pool; the parent owns
    //    cancellation, worker tasks never install signal handlers
    let service = Arc::new(CrawlService::new(ctx));
    let manager = WorkerManager::new(service, settings.pool.size);
    let results = tokio::select! {
        results = manager.run(domains) => results,
        _ = signal::ctrl_c() => {
            warn!("Shutdown signal received, aborting crawl");
            return Ok(());
        }
    };

    // 8. Produce summary output file
    info!("Generating summary information...");
    let summary_text = summary::produce_summary(&results);
    fs::write(&settings.output.summary_file, summary_text)
        .with_context(|| format!("writing summary {}", settings.output.summary_file))?;
    info!("Done");

    Ok(())
}
