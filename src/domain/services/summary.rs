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

use crate::domain::models::crawl::{CrawlResult, DomainStatus};
use crate::utils::errors::CrawlerError;
use chrono::Local;
use std::fmt::Write as _;

/// 单个域名爬取任务的最终结果
pub type CrawlTaskResult = Result<CrawlResult, CrawlerError>;

/// 生成爬虫输出的汇总报告
///
/// 报告包含各终态分类的域名数量及占比、成功/失败链接总数，
/// 以及每个域名逐链接的决策记录。所有域名无论可达与否都会
/// 出现在报告中。
///
/// # 参数
///
/// * `results` - 按输入顺序排列的各域名爬取结果
///
/// # 返回值
///
/// 汇总报告的字符串表示
pub fn produce_summary(results: &[CrawlTaskResult]) -> String {
    let total = results.len().max(1);
    let mut successful_domains = 0usize;
    let mut failed_access_domains = 0usize;
    let mut no_link_domains = 0usize;
    let mut failed_link_domains = 0usize;
    let mut successful_links = 0usize;
    let mut failed_links = 0usize;

    for result in results {
        match result {
            Ok(domain_result) => {
                match domain_result.status() {
                    DomainStatus::Successful => successful_domains += 1,
                    DomainStatus::NoAccess => failed_access_domains += 1,
                    DomainStatus::NoLinks => no_link_domains += 1,
                    DomainStatus::NoValidLinks => failed_link_domains += 1,
                }
                for link in &domain_result.links {
                    if link.is_duplicate {
                        continue; // duplicates count in neither bucket
                    }
                    if link.is_policy {
                        successful_links += 1;
                    } else {
                        failed_links += 1;
                    }
                }
            }
            Err(_) => failed_link_domains += 1,
        }
    }

    let pct = |count: usize| count as f64 / total as f64 * 100.0;
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");

    let mut summary = String::new();
    let _ = writeln!(summary, "Summary of Crawler Output (_{})", timestamp);
    let _ = writeln!(
        summary,
        "   # of Successful Domains = {} ({:.2}%).",
        successful_domains,
        pct(successful_domains)
    );
    let _ = writeln!(
        summary,
        "   Could not access {} ({:.2}%) domains.",
        failed_access_domains,
        pct(failed_access_domains)
    );
    let _ = writeln!(
        summary,
        "   No links found for {} ({:.2}%) domains.",
        no_link_domains,
        pct(no_link_domains)
    );
    let _ = writeln!(
        summary,
        "   No valid links found for {} ({:.2}%) domains.",
        failed_link_domains,
        pct(failed_link_domains)
    );
    let _ = writeln!(summary, "   # of successful links = {}.", successful_links);
    let _ = writeln!(summary, "   # of failed links = {}.", failed_links);
    summary.push('\n');

    for result in results {
        match result {
            Ok(domain_result) => match domain_result.status() {
                DomainStatus::NoAccess => {
                    let _ = writeln!(summary, "{} -- NO_ACCESS\n", domain_result.domain);
                }
                DomainStatus::NoLinks => {
                    let _ = writeln!(summary, "{} -- NO_LINKS\n", domain_result.domain);
                }
                _ => {
                    let _ = writeln!(
                        summary,
                        "{} (avg sim = {:.2})",
                        domain_result.domain, domain_result.sim_avg
                    );
                    for link in &domain_result.links {
                        let tag = if !link.access_success {
                            "NO_ACCESS".to_string()
                        } else if link.is_duplicate {
                            "DUPLICATE".to_string()
                        } else {
                            format!("{:.2}", link.sim_score)
                        };
                        let _ = writeln!(
                            summary,
                            "=> ({}) {} -> {} & {}",
                            tag, link.url, link.html_outfile, link.text_outfile
                        );
                    }
                    summary.push('\n');
                }
            },
            Err(e) => {
                let _ = writeln!(summary, "{} -- FAILED ({})\n", e.domain(), e);
            }
        }
    }
    summary
}
