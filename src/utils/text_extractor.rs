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

use scraper::{Html, Node};

/// 与政策正文无关的标签，其子树中的文本全部丢弃
const BAD_TAGS: [&str; 11] = [
    "style", "script", "noscript", "head", "title", "meta", "img", "iframe", "header", "footer",
    "nav",
];

/// 提取HTML中的可见文本
///
/// 解析HTML文档，丢弃脚本、样式、导航等无关标签子树中的
/// 文本以及注释节点，将其余文本节点去除首尾空白后用单个
/// 空格拼接。空输入或无法解析的输入返回空字符串而不报错。
///
/// # 参数
///
/// * `html` - HTML文档字符串
///
/// # 返回值
///
/// 可见文本拼接成的单个字符串
pub fn strip_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let document = Html::parse_document(html);

    let mut pieces: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let inside_bad_tag = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => BAD_TAGS.contains(&element.name()),
            _ => false,
        });
        if inside_bad_tag {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }
    pieces.join(" ")
}
