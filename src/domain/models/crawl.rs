// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 未持久化产物的占位路径
pub const NOT_PERSISTED: &str = "N/A";

/// 单个候选链接的访问结果
///
/// 记录对一个候选URL的抓取、验证与去重决策。
/// 创建后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOutcome {
    /// 清理后的候选URL（已去除片段标识符）
    pub url: String,
    /// 与基准语料的余弦相似度，未计算时为0.0
    pub sim_score: f64,
    /// 原始HTML产物路径，未持久化时为"N/A"
    pub html_outfile: String,
    /// 提取文本产物路径，未持久化时为"N/A"
    pub text_outfile: String,
    /// 抓取是否成功且提取出非空文本
    pub access_success: bool,
    /// 是否被判定为隐私政策
    pub is_policy: bool,
    /// 提取文本是否与先前某域名的文本完全一致
    pub is_duplicate: bool,
}

impl LinkOutcome {
    /// 链接不可达或提取文本为空
    pub fn unreachable(url: String) -> Self {
        Self {
            url,
            sim_score: 0.0,
            html_outfile: NOT_PERSISTED.to_string(),
            text_outfile: NOT_PERSISTED.to_string(),
            access_success: false,
            is_policy: false,
            is_duplicate: false,
        }
    }

    /// 提取文本与已登记文本完全重复
    ///
    /// `is_policy`保留相似度判定结果，重复的政策页面仍计入有效链接
    pub fn duplicate(url: String, is_policy: bool) -> Self {
        Self {
            url,
            sim_score: 0.0,
            html_outfile: NOT_PERSISTED.to_string(),
            text_outfile: NOT_PERSISTED.to_string(),
            access_success: true,
            is_policy,
            is_duplicate: true,
        }
    }

    /// 相似度未达阈值，仅记录评分
    pub fn rejected(url: String, sim_score: f64) -> Self {
        Self {
            url,
            sim_score,
            html_outfile: NOT_PERSISTED.to_string(),
            text_outfile: NOT_PERSISTED.to_string(),
            access_success: true,
            is_policy: false,
            is_duplicate: false,
        }
    }

    /// 判定为政策并已写出两个产物文件
    pub fn persisted(url: String, sim_score: f64, html_outfile: String, text_outfile: String) -> Self {
        Self {
            url,
            sim_score,
            html_outfile,
            text_outfile,
            access_success: true,
            is_policy: true,
            is_duplicate: false,
        }
    }
}

/// 域名爬取的终态分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// 至少有一个链接被判定为政策
    Successful,
    /// 落地页抓取失败或提取文本为空
    NoAccess,
    /// 落地页可达但没有关键词匹配的链接
    NoLinks,
    /// 有候选链接但没有一个被判定为政策
    NoValidLinks,
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DomainStatus::Successful => write!(f, "SUCCESSFUL"),
            DomainStatus::NoAccess => write!(f, "NO_ACCESS"),
            DomainStatus::NoLinks => write!(f, "NO_LINKS"),
            DomainStatus::NoValidLinks => write!(f, "NO_VALID_LINKS"),
        }
    }
}

/// 单个域名的完整爬取结果
///
/// 由爬取该域名的工作任务独占修改，返回驱动程序后只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    /// 输入列表中的域名
    pub domain: String,
    /// 落地页是否可达且含非空文本
    pub access_success: bool,
    /// 所有已记录链接评分的滑动平均值（含0.0评分的失败与重复链接）
    pub sim_avg: f64,
    /// 按发现顺序记录的链接结果
    pub links: Vec<LinkOutcome>,
}

impl CrawlResult {
    pub fn new(domain: &str, access_success: bool) -> Self {
        Self {
            domain: domain.to_string(),
            access_success,
            sim_avg: 0.0,
            links: Vec::new(),
        }
    }

    /// 追加一条链接结果并更新滑动平均
    pub fn add_link(&mut self, outcome: LinkOutcome) {
        let sim_score = outcome.sim_score;
        self.links.push(outcome);
        self.sim_avg += (sim_score - self.sim_avg) / self.links.len() as f64;
    }

    /// 域名终态分类
    pub fn status(&self) -> DomainStatus {
        if !self.access_success {
            DomainStatus::NoAccess
        } else if self.links.is_empty() {
            DomainStatus::NoLinks
        } else if self.links.iter().any(|link| link.is_policy) {
            DomainStatus::Successful
        } else {
            DomainStatus::NoValidLinks
        }
    }
}
