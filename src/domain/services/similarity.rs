// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::language_filter::LanguageFilter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

// Tokens are runs of two or more word characters, lowercased.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

fn term_counts(text: &str) -> HashMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for token in TOKEN_RE.find_iter(&lowered) {
        *counts.entry(token.as_str().to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Computes the cosine similarity of the TF-IDF vectors of two documents.
///
/// The vocabulary is fit freshly from just these two documents on every
/// call, so each comparison is self-contained. Term weights use smoothed
/// inverse document frequency, `ln((1 + n) / (1 + df)) + 1` with n = 2,
/// and each document vector is L2-normalized before the dot product.
/// Identical documents score 1.0, documents sharing no terms score 0.0.
pub fn tfidf_cosine(doc_a: &str, doc_b: &str) -> f64 {
    let counts_a = term_counts(doc_a);
    let counts_b = term_counts(doc_b);

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (term, tf_a) in &counts_a {
        let tf_b = counts_b.get(term).copied().unwrap_or(0.0);
        let df = if tf_b > 0.0 { 2.0 } else { 1.0 };
        let idf = ((1.0_f64 + 2.0) / (1.0 + df)).ln() + 1.0;
        let weight_a = tf_a * idf;
        norm_a += weight_a * weight_a;
        if tf_b > 0.0 {
            let weight_b = tf_b * idf;
            dot += weight_a * weight_b;
        }
    }
    for (term, tf_b) in &counts_b {
        let df = if counts_a.contains_key(term) { 2.0 } else { 1.0 };
        let idf = ((1.0_f64 + 2.0) / (1.0 + df)).ln() + 1.0;
        let weight_b = tf_b * idf;
        norm_b += weight_b * weight_b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// 政策验证器
///
/// 将候选文本与基准语料比较，得出余弦相似度评分。
/// 非英语文本直接得0分，不进入相似度计算。
pub struct PolicyVerifier {
    /// 基准语料（所有人工核验政策去除机构名后拼接的字符串）
    ground_truth: String,
    /// 英语文本过滤器
    language_filter: Arc<LanguageFilter>,
}

impl PolicyVerifier {
    pub fn new(ground_truth: String, language_filter: Arc<LanguageFilter>) -> Self {
        Self {
            ground_truth,
            language_filter,
        }
    }

    /// 验证候选文本是否像隐私政策
    ///
    /// # 参数
    ///
    /// * `contents` - 候选页面的提取文本
    ///
    /// # 返回值
    ///
    /// 与基准语料的余弦相似度（0.0-1.0）；非英语文本返回0.0
    pub fn verify(&self, contents: &str) -> f64 {
        // verify majority of the contents are english-language, discard if not
        if !self.language_filter.is_english(contents) {
            return 0.0;
        }
        tfidf_cosine(&self.ground_truth, contents)
    }
}
