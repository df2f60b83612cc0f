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

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// 词典词占比的默认阈值（百分比）
const DEFAULT_WORD_THRESHOLD_PCT: f64 = 50.0;
/// 字母字符占比的默认阈值（百分比）
const DEFAULT_LETTER_THRESHOLD_PCT: f64 = 85.0;

/// 英语文本过滤器
///
/// 通过词典词占比和字母密度两个指标判定文本是否以英语为主。
/// 比完整的相似度计算便宜得多，用于在验证前快速丢弃外语页面。
pub struct LanguageFilter {
    /// 大写形式的英语词表
    words: HashSet<String>,
}

impl LanguageFilter {
    /// 从词典文件加载过滤器
    ///
    /// 词典为按行分隔的纯文本词表，整个进程只加载一次。
    ///
    /// # 参数
    ///
    /// * `path` - 词典文件路径
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_words(contents.split('\n')))
    }

    /// 从词迭代器构建过滤器
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|word| word.trim().to_uppercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// 判定文本是否以英语为主
    ///
    /// 使用默认阈值：50%的词在词典中，85%的字符为字母或空白
    pub fn is_english(&self, text: &str) -> bool {
        self.is_english_with(text, DEFAULT_WORD_THRESHOLD_PCT, DEFAULT_LETTER_THRESHOLD_PCT)
    }

    /// 按给定阈值判定文本是否以英语为主
    ///
    /// # 参数
    ///
    /// * `text` - 待判定文本
    /// * `word_threshold_pct` - 词典词占比阈值（百分比）
    /// * `letter_threshold_pct` - 字母字符占比阈值（百分比）
    ///
    /// # 返回值
    ///
    /// 两个占比都达到阈值时返回true；空文本返回false
    pub fn is_english_with(
        &self,
        text: &str,
        word_threshold_pct: f64,
        letter_threshold_pct: f64,
    ) -> bool {
        let words_match = self.english_word_ratio(text) * 100.0 >= word_threshold_pct;

        let total_chars = text.chars().count();
        let letters_pct = if total_chars == 0 {
            0.0
        } else {
            let letter_chars = remove_nonletters(text).chars().count();
            letter_chars as f64 / total_chars as f64 * 100.0
        };
        let letters_match = letters_pct >= letter_threshold_pct;

        words_match && letters_match
    }

    /// 文本中词典词的占比（0.0-1.0）
    fn english_word_ratio(&self, text: &str) -> f64 {
        let cleaned = remove_nonletters(&text.to_uppercase());
        let possible_words: Vec<&str> = cleaned.split_whitespace().collect();
        if possible_words.is_empty() {
            return 0.0; // no words at all
        }
        let matches = possible_words
            .iter()
            .filter(|word| self.words.contains(**word))
            .count();
        matches as f64 / possible_words.len() as f64
    }
}

/// 去掉字母和空白以外的所有字符
fn remove_nonletters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '\t' | '\n'))
        .collect()
}
