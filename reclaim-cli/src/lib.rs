use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use reclaim_core::{
    CleanupStats, ProjectRegistry, ProjectScanner,
    cleaner::{CacheCleaner, CleanConfig},
    scanner::ScanConfig,
};

#[derive(Parser)]
#[command(name = "reclaim")]
#[command(about = "Cache Remover Utility - Remove rebuildable cache files from projects")]
#[command(version)]
pub struct Cli {
    /// Root directory to scan for projects (takes precedence over --dir)
    #[arg(value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Root directory to scan for projects
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Show what would be removed without actually removing
    #[arg(long)]
    pub dry_run: bool,

    /// Number of worker threads
    #[arg(long, default_value_t = default_workers())]
    pub workers: usize,

    /// Verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Maximum directory depth to scan
    #[arg(long, default_value_t = 10)]
    pub max_depth: usize,

    /// Ask for confirmation before removing each cache
    #[arg(long)]
    pub interactive: bool,

    /// List all supported project types
    #[arg(long)]
    pub list_types: bool,
}

impl Cli {
    /// 位置参数优先于 --dir
    pub fn scan_root(&self) -> &Path {
        self.path.as_deref().unwrap_or(&self.dir)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // 默认只报错误,--verbose 打开逐条诊断
    let log_level = if cli.verbose { "debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "reclaim_core={log_level},reclaim_cli={log_level}"
        ))
        .init();

    run(&cli)
}

pub fn run(cli: &Cli) -> Result<()> {
    if cli.list_types {
        display_project_types(&ProjectRegistry::built_in());
        return Ok(());
    }

    println!("🧹 Cache Remover Utility");
    println!("Scanning directory: {}", cli.scan_root().display());
    println!("Workers: {}", cli.workers);
    if cli.dry_run {
        println!("🔍 DRY RUN MODE - No files will be removed");
    }
    println!();

    let root = std::path::absolute(cli.scan_root())
        .with_context(|| format!("Failed to resolve path: {}", cli.scan_root().display()))?;
    debug!("解析后的扫描根: {:?}", root);

    let start_time = Instant::now();

    let registry = ProjectRegistry::built_in();
    let scanner = ProjectScanner::new(
        registry.clone(),
        ScanConfig {
            max_depth: cli.max_depth,
        },
    );
    let projects = scanner.scan(&root)?;

    println!("Found {} projects\n", projects.len());

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let mut stats = CleanupStats::new();
    stats.projects_found = projects.len();

    let cleaner = CacheCleaner::new(
        registry,
        CleanConfig {
            dry_run: cli.dry_run,
            interactive: cli.interactive,
            workers: cli.workers,
            max_depth: cli.max_depth,
        },
    );
    let (items, bytes) = cleaner.process_projects(&projects)?;
    stats.add_removal(items, bytes);
    stats.duration_ms = start_time.elapsed().as_millis() as u64;

    display_stats(&stats);

    Ok(())
}

fn display_project_types(registry: &ProjectRegistry) {
    println!(
        "📋 Supported Project Types ({} total):\n",
        registry.types().len()
    );

    for project_type in registry.types() {
        println!("🔹 {}", project_type.name);
        println!("   Indicators: {}", project_type.indicators.join(", "));
        println!(
            "   Cache Directories: {}",
            project_type.cache.directories.join(", ")
        );

        if !project_type.cache.files.is_empty() {
            println!("   Cache Files: {}", project_type.cache.files.join(", "));
        }

        if !project_type.cache.extensions.is_empty() {
            println!(
                "   Cache Extensions: {}",
                project_type.cache.extensions.join(", ")
            );
        }

        println!();
    }
}

fn display_stats(stats: &CleanupStats) {
    println!("📊 Cleanup Statistics:");
    println!("   Projects processed: {}", stats.projects_found);
    println!("   Cache items removed: {}", stats.items_removed);
    println!("   Total space reclaimed: {}", stats.format_size());
    println!("   Processing time: {:.2}s", stats.elapsed_secs());
    if let Some(speed) = stats.throughput_mb_s() {
        println!("   Average speed: {speed:.2} MB/s");
    }
}
