use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{debug, info, warn};

use crate::error::{ReclaimError, Result};
use crate::registry::ProjectRegistry;

/// 项目扫描器配置
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// 递归深度上限,扫描根计为第 0 层
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { max_depth: 10 }
    }
}

/// 项目扫描器:在目录树中定位所有已知类型的项目根
///
/// Hidden directories are never descended into, symlinks are treated as
/// opaque entries, and listing failures skip the affected subtree only.
/// A project root does not stop the descent, so nested projects inside a
/// monorepo are still discovered.
pub struct ProjectScanner {
    registry: ProjectRegistry,
    config: ScanConfig,
}

impl ProjectScanner {
    /// 创建新的扫描器
    pub fn new(registry: ProjectRegistry, config: ScanConfig) -> Self {
        Self { registry, config }
    }

    /// 扫描指定路径下的所有项目根
    pub fn scan<P: AsRef<Path>>(&self, root_path: P) -> Result<Vec<PathBuf>> {
        let root_path = root_path.as_ref();
        info!("开始扫描路径: {:?}", root_path);

        // 只有根目录本身访问失败才致命,遍历中的错误降级为告警
        let metadata = match fs::metadata(root_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReclaimError::RootNotFound(root_path.to_path_buf()));
            }
            Err(source) => {
                return Err(ReclaimError::Io {
                    path: root_path.to_path_buf(),
                    source,
                });
            }
        };

        if !metadata.is_dir() {
            return Err(ReclaimError::RootNotADirectory(root_path.to_path_buf()));
        }

        // 只保留隐藏目录过滤,不启用 gitignore 语义
        let mut builder = WalkBuilder::new(root_path);
        builder
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .max_depth(Some(self.config.max_depth));

        let projects: Vec<PathBuf> = builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => self.process_entry(entry),
                Err(e) => {
                    warn!("扫描错误: {}", e);
                    None
                }
            })
            .collect();

        info!("找到 {} 个项目", projects.len());
        Ok(projects)
    }

    /// 处理单个目录条目
    fn process_entry(&self, entry: DirEntry) -> Option<PathBuf> {
        let file_type = entry.file_type()?;
        if !file_type.is_dir() {
            return None;
        }

        let path = entry.path();
        if self.registry.is_project_root(path) {
            debug!("发现项目: {:?}", path);
            return Some(path.to_path_buf());
        }

        None
    }
}

impl Default for ProjectScanner {
    fn default() -> Self {
        Self::new(ProjectRegistry::built_in(), ScanConfig::default())
    }
}
