use serde::{Deserialize, Serialize};

pub mod cleaner;
pub mod error;
pub mod locator;
pub mod registry;
pub mod remover;
pub mod scanner;
pub mod size;

pub use cleaner::CacheCleaner;
pub use error::ReclaimError;
pub use locator::{CacheItem, ItemKind};
pub use registry::{CacheSpec, ProjectRegistry, ProjectType};
pub use scanner::ProjectScanner;

/// 清理结果统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupStats {
    pub projects_found: usize,
    pub items_removed: usize,
    pub bytes_reclaimed: u64,
    pub duration_ms: u64,
}

impl Default for CleanupStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanupStats {
    pub fn new() -> Self {
        Self {
            projects_found: 0,
            items_removed: 0,
            bytes_reclaimed: 0,
            duration_ms: 0,
        }
    }

    /// 累加单个项目的清理结果
    pub fn add_removal(&mut self, items: usize, bytes: u64) {
        self.items_removed += items;
        self.bytes_reclaimed += bytes;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Average reclaim throughput in MB/s, if any time elapsed.
    pub fn throughput_mb_s(&self) -> Option<f64> {
        if self.duration_ms == 0 {
            return None;
        }
        Some((self.bytes_reclaimed as f64 / (1024.0 * 1024.0)) / self.elapsed_secs())
    }

    pub fn format_size(&self) -> String {
        format_bytes(self.bytes_reclaimed)
    }
}

/// 格式化字节大小为人类可读格式
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}
