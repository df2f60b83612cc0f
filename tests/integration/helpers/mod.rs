// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use policrawl::domain::services::crawl_service::CrawlContext;
use policrawl::domain::services::duplicate_detector::DuplicateDetector;
use policrawl::domain::services::language_filter::LanguageFilter;
use policrawl::domain::services::similarity::PolicyVerifier;
use policrawl::engines::router::EngineRouter;
use policrawl::engines::traits::{EngineError, FetchRequest, FetchResponse, ScraperEngine};
use policrawl::workers::progress::ProgressTracker;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Canned-response engine: serves a fixed HTML string per URL and
/// fails every URL it has never heard of.
pub struct StubEngine {
    pages: HashMap<String, String>,
}

impl StubEngine {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl ScraperEngine for StubEngine {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        match self.pages.get(&request.url) {
            Some(html) => Ok(FetchResponse {
                status_code: 200,
                content: html.clone(),
                response_time_ms: 0,
            }),
            None => Err(EngineError::Other(format!("no stub for {}", request.url))),
        }
    }

    fn support_score(&self, _request: &FetchRequest) -> u8 {
        100
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// A reference policy paragraph; the test dictionary covers its vocabulary
/// so it passes the language filter.
pub fn policy_text() -> &'static str {
    "We collect your personal data and share it with third parties. \
     We use cookies to improve our services. You can contact us about \
     your privacy rights at any time."
}

pub fn test_language_filter() -> LanguageFilter {
    LanguageFilter::from_words([
        "we", "collect", "your", "personal", "data", "and", "share", "it", "with", "third",
        "parties", "use", "cookies", "to", "improve", "our", "services", "you", "can", "contact",
        "us", "about", "privacy", "rights", "at", "any", "time", "policy", "the", "all",
        "weather", "report", "for", "today", "is", "sunny", "morning",
    ])
}

/// Builds a full crawl context around a stub engine, with the reference
/// policy paragraph as the entire ground truth corpus.
pub fn stub_context(
    pages: &[(&str, &str)],
    total_domains: usize,
    max_crawler_depth: u32,
    html_outdir: &Path,
    text_outdir: &Path,
) -> Arc<CrawlContext> {
    let engines: Vec<Arc<dyn ScraperEngine>> = vec![Arc::new(StubEngine::new(pages))];
    Arc::new(CrawlContext {
        keywords: vec!["privacy".to_string()],
        cos_sim_threshold: 0.6,
        max_crawler_depth,
        html_outdir: html_outdir.to_path_buf(),
        text_outdir: text_outdir.to_path_buf(),
        verifier: PolicyVerifier::new(policy_text().to_string(), Arc::new(test_language_filter())),
        duplicates: DuplicateDetector::new(),
        progress: ProgressTracker::new(total_domains),
        router: Arc::new(EngineRouter::new(engines, Duration::from_secs(5))),
    })
}
