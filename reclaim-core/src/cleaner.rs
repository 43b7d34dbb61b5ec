use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info};

use crate::CleanupStats;
use crate::error::{ReclaimError, Result};
use crate::format_bytes;
use crate::locator::find_cache_items;
use crate::registry::ProjectRegistry;
use crate::remover::remove_items;
use crate::scanner::{ProjectScanner, ScanConfig};

/// 清理器配置
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// 只报告,不删除任何东西
    pub dry_run: bool,
    /// 每个项目删除前要求确认
    pub interactive: bool,
    /// 工作线程数,0 表示交给线程池自行决定
    pub workers: usize,
    /// 项目发现的递归深度上限
    pub max_depth: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            interactive: false,
            workers: 0,
            max_depth: 10,
        }
    }
}

/// 缓存清理器:发现 → 枚举 → 审批 → 删除
///
/// Discovery runs once on the calling thread, then each found project is
/// processed as an independent task on a dedicated worker pool. Results
/// are aggregated on the coordinating thread only; worker tasks never
/// touch the shared statistics. Progress and outcome lines are printed to
/// stdout, diagnostics go through `tracing`.
pub struct CacheCleaner {
    registry: ProjectRegistry,
    config: CleanConfig,
    prompt_lock: Mutex<()>,
}

impl CacheCleaner {
    /// 创建新的清理器
    pub fn new(registry: ProjectRegistry, config: CleanConfig) -> Self {
        Self {
            registry,
            config,
            prompt_lock: Mutex::new(()),
        }
    }

    /// 一次完整的清理:扫描 + 处理所有项目,交互确认走标准输入
    pub fn run<P: AsRef<Path>>(&self, root: P) -> Result<CleanupStats> {
        self.run_with_confirm(root, |path: &Path| self.confirm_removal(path))
    }

    /// Full cleanup run with a custom confirmation hook.
    ///
    /// The scan root is resolved to an absolute path before discovery, so
    /// reported item paths stay absolute even for relative input. The hook
    /// is consulted once per project, and only when the configuration asks
    /// for interactive mode and dry-run is off. The returned statistics
    /// count every discovered project, including those the hook declined.
    pub fn run_with_confirm<P, F>(&self, root: P, confirm: F) -> Result<CleanupStats>
    where
        P: AsRef<Path>,
        F: Fn(&Path) -> bool + Sync,
    {
        let start_time = Instant::now();

        let root = root.as_ref();
        let root = std::path::absolute(root).map_err(|source| ReclaimError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let scanner = ProjectScanner::new(
            self.registry.clone(),
            ScanConfig {
                max_depth: self.config.max_depth,
            },
        );
        let projects = scanner.scan(&root)?;

        let mut stats = CleanupStats::new();
        stats.projects_found = projects.len();

        if !projects.is_empty() {
            let (items, bytes) = self.process_projects_with_confirm(&projects, &confirm)?;
            stats.add_removal(items, bytes);
        }

        stats.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(stats)
    }

    /// 并行处理一批项目,返回 (删除条目数, 回收字节数)
    pub fn process_projects(&self, projects: &[PathBuf]) -> Result<(usize, u64)> {
        self.process_projects_with_confirm(projects, &|path: &Path| self.confirm_removal(path))
    }

    /// 并行处理一批项目,交互确认走给定的回调
    pub fn process_projects_with_confirm<F>(
        &self,
        projects: &[PathBuf],
        confirm: &F,
    ) -> Result<(usize, u64)>
    where
        F: Fn(&Path) -> bool + Sync,
    {
        info!("开始处理 {} 个项目", projects.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|e| ReclaimError::WorkerPool(e.to_string()))?;

        let results: Vec<(usize, u64)> = pool.install(|| {
            projects
                .par_iter()
                .map(|project| self.process_project(project, confirm))
                .collect()
        });

        // 统计只在协调线程上合并
        let mut total_items = 0usize;
        let mut total_bytes = 0u64;
        for (items, bytes) in results {
            total_items += items;
            total_bytes += bytes;
        }

        info!(
            "处理完成: 删除 {} 个条目,回收 {}",
            total_items,
            format_bytes(total_bytes)
        );

        Ok((total_items, total_bytes))
    }

    /// Pipeline for one project: detect, enumerate, report, gate, remove.
    ///
    /// Never fails; a directory that is no longer a project, has no cache,
    /// or was declined contributes (0, 0).
    pub fn process_project<F>(&self, project_path: &Path, confirm: &F) -> (usize, u64)
    where
        F: Fn(&Path) -> bool + Sync,
    {
        let Some(project_type) = self.registry.detect(project_path) else {
            return (0, 0);
        };

        debug!("处理 {} 项目: {:?}", project_type.name, project_path);

        let items = find_cache_items(project_path, &project_type.cache);
        if items.is_empty() {
            debug!("没有可清理的缓存: {:?}", project_path);
            return (0, 0);
        }

        let total_size: u64 = items.iter().map(|item| item.size).sum();

        println!(
            "🗂️  {} ({}): {} cache items ({})",
            project_display_name(project_path),
            project_type.name,
            items.len(),
            format_bytes(total_size)
        );

        if self.config.interactive && !self.config.dry_run && !confirm(project_path) {
            println!("⏭️  Skipped: {}", project_path.display());
            return (0, 0);
        }

        if self.config.dry_run {
            println!(
                "🔍 Would remove {} items ({}) from: {}",
                items.len(),
                format_bytes(total_size),
                project_path.display()
            );
            for item in &items {
                println!("  - {} ({})", item.path.display(), item.formatted_size());
            }
            return (0, 0);
        }

        let (removed_items, removed_bytes) = remove_items(&items);
        if removed_items > 0 {
            println!(
                "✅ Removed {} items ({}) from: {}",
                removed_items,
                format_bytes(removed_bytes),
                project_path.display()
            );
        }

        (removed_items, removed_bytes)
    }

    /// 通过标准输入确认,空输入和读取失败都按拒绝处理
    pub fn confirm_removal(&self, project_path: &Path) -> bool {
        // 串行化提示,避免多个 worker 同时等待输入
        let _guard = self.prompt_guard();

        print!("Remove cache for {}? [y/N]: ", project_path.display());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }

        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }

    /// 拿提示互斥锁,锁中毒时照样接管守卫继续串行化
    fn prompt_guard(&self) -> MutexGuard<'_, ()> {
        self.prompt_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CacheCleaner {
    fn default() -> Self {
        Self::new(ProjectRegistry::built_in(), CleanConfig::default())
    }
}

fn project_display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}
