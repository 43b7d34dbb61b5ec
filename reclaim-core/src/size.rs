use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use walkdir::WalkDir;

/// Recursive byte size of all regular files under `path`.
///
/// Unreadable entries contribute nothing, a missing or unreadable root
/// yields 0; this never fails. Symbolic links are treated as opaque
/// entries and not followed.
pub fn dir_size<P: AsRef<Path>>(path: P) -> u64 {
    // 并行遍历直接累加,不把条目收集成 Vec
    let total_size = AtomicU64::new(0);

    WalkDir::new(path.as_ref())
        .into_iter()
        .par_bridge()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .for_each(|entry| {
            if let Ok(metadata) = entry.metadata() {
                total_size.fetch_add(metadata.len(), Ordering::Relaxed);
            }
        });

    total_size.into_inner()
}
