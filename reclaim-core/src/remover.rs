use std::fs;
use tracing::{debug, warn};

use crate::locator::{CacheItem, ItemKind};

/// Delete a batch of cache items.
///
/// Existence is re-checked right before each deletion; items that
/// vanished since enumeration are skipped and not counted. A failed
/// deletion is logged and skipped, the batch always runs to completion.
/// Returns the number of items deleted and their recorded byte total,
/// using the enumeration-time sizes.
pub fn remove_items(items: &[CacheItem]) -> (usize, u64) {
    let mut removed_items = 0usize;
    let mut removed_bytes = 0u64;

    for item in items {
        if !item.path.exists() {
            continue;
        }

        let result = match item.kind {
            ItemKind::Directory => fs::remove_dir_all(&item.path),
            ItemKind::File => fs::remove_file(&item.path),
        };

        match result {
            Ok(()) => {
                removed_items += 1;
                removed_bytes += item.size;
                debug!("已删除: {:?} ({})", item.path, item.formatted_size());
            }
            Err(e) => warn!("删除失败 {:?}: {}", item.path, e),
        }
    }

    (removed_items, removed_bytes)
}
