// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含爬取流水线的各个领域服务：
/// - crawl_service：单域名爬取状态机与链接发现
/// - language_filter：英语文本判定
/// - similarity：TF-IDF余弦相似度验证
/// - ground_truth：基准语料构建
/// - duplicate_detector：跨域名文本去重
/// - summary：汇总报告生成
pub mod crawl_service;
pub mod duplicate_detector;
pub mod ground_truth;
pub mod language_filter;
pub mod similarity;
pub mod summary;
