use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::registry::CacheSpec;
use crate::size::dir_size;

/// 缓存条目的类别,决定删除方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Directory,
    File,
}

/// A cache entry found on disk. The size is a snapshot taken at
/// enumeration time and may be stale by removal time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheItem {
    pub path: PathBuf,
    pub size: u64,
    pub kind: ItemKind,
}

impl CacheItem {
    pub fn formatted_size(&self) -> String {
        crate::format_bytes(self.size)
    }
}

/// Enumerate the removable cache items of one project.
///
/// Listed directory names are probed directly under the project root and
/// reported only when they hold at least one byte; listed file names are
/// reported regardless of size. When the cache declares extensions, the
/// whole project subtree is walked (unbounded, hidden entries included)
/// for matching files. Unreadable entries are skipped.
pub fn find_cache_items(project_path: &Path, cache: &CacheSpec) -> Vec<CacheItem> {
    let mut items = Vec::new();

    for dir_name in &cache.directories {
        let dir_path = project_path.join(dir_name);
        if dir_path.is_dir() {
            let size = dir_size(&dir_path);
            // 空目录没有可回收的内容,不上报
            if size > 0 {
                items.push(CacheItem {
                    path: dir_path,
                    size,
                    kind: ItemKind::Directory,
                });
            }
        }
    }

    for file_name in &cache.files {
        let file_path = project_path.join(file_name);
        if file_path.is_file() {
            if let Ok(metadata) = fs::metadata(&file_path) {
                items.push(CacheItem {
                    path: file_path,
                    size: metadata.len(),
                    kind: ItemKind::File,
                });
            }
        }
    }

    if !cache.extensions.is_empty() {
        for entry in WalkDir::new(project_path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if cache.extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
                if let Ok(metadata) = entry.metadata() {
                    items.push(CacheItem {
                        path: entry.into_path(),
                        size: metadata.len(),
                        kind: ItemKind::File,
                    });
                }
            }
        }
    }

    items
}
