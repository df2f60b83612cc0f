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

use crate::domain::models::crawl::{CrawlResult, LinkOutcome};
use crate::domain::services::duplicate_detector::DuplicateDetector;
use crate::domain::services::similarity::PolicyVerifier;
use crate::engines::router::EngineRouter;
use crate::utils::errors::CrawlerError;
use crate::utils::text_extractor::strip_text;
use crate::workers::progress::ProgressTracker;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// 爬取上下文
///
/// 驱动程序启动时构建一次的共享状态，通过句柄注入每个
/// 爬取任务：基准语料和配置只读，去重映射和进度计数是
/// 仅有的两处共享可变状态。
pub struct CrawlContext {
    /// 链接筛选关键词（小写）
    pub keywords: Vec<String>,
    /// 判定为政策的最小余弦相似度
    pub cos_sim_threshold: f64,
    /// 每个域名允许的链接发现扩展次数
    pub max_crawler_depth: u32,
    /// 原始HTML产物输出目录
    pub html_outdir: PathBuf,
    /// 提取文本产物输出目录
    pub text_outdir: PathBuf,
    /// 政策验证器（持有基准语料和英语过滤器）
    pub verifier: PolicyVerifier,
    /// 跨域名文本去重器
    pub duplicates: DuplicateDetector,
    /// 共享进度跟踪器
    pub progress: ProgressTracker,
    /// 抓取引擎路由器
    pub router: Arc<EngineRouter>,
}

/// 爬取服务
///
/// 处理单个域名爬取任务的核心业务逻辑
pub struct CrawlService {
    ctx: Arc<CrawlContext>,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `ctx` - 共享爬取上下文
    pub fn new(ctx: Arc<CrawlContext>) -> Self {
        Self { ctx }
    }

    /// 爬取单个域名
    ///
    /// 先确认域名落地页可达，再从落地页收集政策候选链接，
    /// 然后逐个访问候选链接验证是否为政策。候选页面上新发现
    /// 的链接在扩展预算内追加到队尾继续访问。
    ///
    /// # 参数
    ///
    /// * `domain` - 输入列表中的域名
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlResult)` - 该域名的完整爬取结果
    /// * `Err(CrawlerError)` - 无法恢复的任务失败（例如产物写盘失败）
    pub async fn crawl(&self, domain: &str) -> Result<CrawlResult, CrawlerError> {
        let ctx = &self.ctx;

        // first get the domain landing page via HTTPS
        let full_url = normalize_domain_url(domain);
        let domain_html = ctx.router.fetch_or_empty(&full_url).await;
        if strip_text(&domain_html).is_empty() {
            ctx.progress.complete(domain);
            return Ok(CrawlResult::new(domain, false));
        }

        // get links from domain landing page, return if none found
        let mut links = LinkDiscoverer::find_policy_links(&full_url, &domain_html, &ctx.keywords);
        if links.is_empty() {
            ctx.progress.complete(domain);
            return Ok(CrawlResult::new(domain, true));
        }

        // go down the link rabbit hole to download the html and verify that they are policies
        let mut retobj = CrawlResult::new(domain, true);
        let mut depth_count: u32 = 0;
        let mut output_count: u32 = 0;
        let mut cursor = 0;
        // index cursor instead of an iterator: the queue grows while we walk it
        while cursor < links.len() {
            let link = links[cursor].clone();
            cursor += 1;

            let link_html = ctx.router.fetch_or_empty(&link).await;
            let link_contents = strip_text(&link_html);
            if link_contents.is_empty() {
                retobj.add_link(LinkOutcome::unreachable(link));
                continue; // policy is empty, skip this whole thing
            }

            // add links on this page to the queue if they are new;
            // the expansion budget is consumed per event, not per branch
            if depth_count < ctx.max_crawler_depth {
                depth_count += 1;
                for new_link in
                    LinkDiscoverer::find_policy_links(&full_url, &link_html, &ctx.keywords)
                {
                    if !links.contains(&new_link) {
                        links.push(new_link);
                    }
                }
            }

            // get similarity score, check against the score threshold to see if policy
            let sim_score = ctx.verifier.verify(&link_contents);
            let is_policy = sim_score >= ctx.cos_sim_threshold;

            if is_policy {
                if ctx.duplicates.is_duplicate(&link_contents, domain) {
                    retobj.add_link(LinkOutcome::duplicate(link, true));
                    continue; // we've already seen this policy, skip
                }
                output_count += 1;
                let (html_outfile, text_outfile) =
                    self.persist_policy(domain, output_count, &link_html, &link_contents)?;
                retobj.add_link(LinkOutcome::persisted(link, sim_score, html_outfile, text_outfile));
            } else {
                if ctx.duplicates.is_duplicate(&link_contents, domain) {
                    retobj.add_link(LinkOutcome::duplicate(link, false));
                    continue;
                }
                retobj.add_link(LinkOutcome::rejected(link, sim_score));
            }
        }

        debug!(
            "domain {} finished: {} links visited, status {}",
            domain,
            retobj.links.len(),
            retobj.status()
        );
        ctx.progress.complete(domain);
        Ok(retobj)
    }

    /// 持久化一份已验证的政策
    ///
    /// 原始HTML和提取文本分别写入两个产物目录，文件名由域名
    /// 主干和该域名内的持久化序号决定。
    fn persist_policy(
        &self,
        domain: &str,
        output_count: u32,
        link_html: &str,
        link_contents: &str,
    ) -> Result<(String, String), CrawlerError> {
        let stem = domain_file_stem(domain);
        let html_outfile = self
            .ctx
            .html_outdir
            .join(format!("{}_{}.html", stem, output_count));
        let text_outfile = self
            .ctx
            .text_outdir
            .join(format!("{}_{}.txt", stem, output_count));

        fs::write(&html_outfile, link_html).map_err(|source| CrawlerError::PolicyPersist {
            domain: domain.to_string(),
            source,
        })?;
        fs::write(&text_outfile, link_contents).map_err(|source| CrawlerError::PolicyPersist {
            domain: domain.to_string(),
            source,
        })?;

        Ok((
            html_outfile.to_string_lossy().into_owned(),
            text_outfile.to_string_lossy().into_owned(),
        ))
    }
}

/// 将输入域名规范化为HTTPS地址
///
/// 无协议前缀时补上`http://`，含`http://`但不含`https://`时
/// 强制替换为`https://`。
pub fn normalize_domain_url(domain: &str) -> String {
    let full_url = if domain.contains("http") {
        domain.to_string()
    } else {
        format!("http://{}", domain)
    };
    if full_url.contains("https://") {
        full_url
    } else {
        full_url.replace("http://", "https://")
    }
}

/// 域名对应的产物文件名主干
///
/// 去掉最后一个点号后缀（`google.com` -> `google`），
/// 并替换路径分隔符等不适合出现在文件名中的字符。
pub fn domain_file_stem(domain: &str) -> String {
    let base = match domain.rsplit_once('.') {
        Some((head, _)) => head,
        None => domain,
    };
    base.replace(['/', ':'], "_")
}

/// 链接发现器
///
/// 负责从HTML内容中提取可能指向隐私政策的链接
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 提取页面上的政策候选链接
    ///
    /// 只保留可见文本或href包含任一关键词（不区分大小写）的
    /// 锚元素。没有文本节点的锚即使href匹配也跳过。href包含
    /// "javascript"或长度不足3个字符的丢弃。相对链接用域名
    /// 基地址补全，片段标识符去除，完全相同的链接只保留首个。
    ///
    /// # 参数
    ///
    /// * `full_url` - 域名的完整基地址
    /// * `html` - 页面HTML
    /// * `keywords` - 筛选关键词（小写）
    ///
    /// # 返回值
    ///
    /// 按文档顺序排列、去重后的绝对URL列表
    pub fn find_policy_links(full_url: &str, html: &str, keywords: &[String]) -> Vec<String> {
        let document = Html::parse_document(html);
        let Ok(selector) = Selector::parse("a") else {
            return Vec::new();
        };

        let mut links = Vec::new();
        let mut seen = HashSet::new();
        for element in document.select(&selector) {
            // anchors without a text node are skipped even when the href matches
            if element.text().next().is_none() {
                continue;
            }
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let anchor_text: String = element.text().collect::<String>().to_lowercase();
            let href_lower = href.to_lowercase();
            if !keywords
                .iter()
                .any(|kw| anchor_text.contains(kw) || href_lower.contains(kw))
            {
                continue;
            }

            // Not a proper link
            if href_lower.contains("javascript") {
                continue;
            }
            if href.len() < 3 {
                continue;
            }

            // This link is complete; incomplete ones get the base url spliced in
            let final_link = if href.contains("http") {
                href.to_string()
            } else if let Some(rest) = href.strip_prefix("//") {
                format!("http://{}", rest)
            } else if !href.starts_with('/') {
                format!("{}/{}", full_url, href)
            } else {
                format!("{}{}", full_url, href)
            };

            let cleaned = clean_link(&final_link).to_string();
            if seen.insert(cleaned.clone()) {
                links.push(cleaned);
            }
        }
        links
    }
}

/// 去除链接中的片段标识符
///
/// 很多链接指向页面内的某个小节，这类地址不应被视作
/// 不同的URL，从第一个`#`起全部截掉。
pub fn clean_link(link: &str) -> &str {
    match link.split_once('#') {
        Some((head, _)) => head,
        None => link,
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
