// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 实现网页抓取引擎及按支持度排序的引擎路由：
/// - traits：抓取引擎特质与请求/响应类型
/// - reqwest_engine：基于reqwest的轻量HTTP抓取引擎
/// - browser_engine：基于chromiumoxide的浏览器抓取引擎
/// - router：按支持分数选择引擎并在失败时回退
pub mod browser_engine;
pub mod reqwest_engine;
pub mod router;
pub mod traits;
