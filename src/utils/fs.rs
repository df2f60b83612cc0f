// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs;
use std::io;
use std::path::Path;

/// 创建干净的输出目录
///
/// 目录不存在时创建，已存在时清空其中的普通文件，
/// 保证每次运行的产物目录从空白开始。
pub fn mkdir_clean(dir_path: &Path) -> io::Result<()> {
    if !dir_path.exists() {
        return fs::create_dir_all(dir_path);
    }
    for entry in fs::read_dir(dir_path)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
