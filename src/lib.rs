//! # Reclaim
//!
//! A tool for removing rebuildable cache files from development projects.
//!
//! This crate scans a directory tree for project roots (Node.js, Python,
//! Java/Maven, Gradle, Go and Rust), enumerates their cache artifacts and
//! removes them in parallel to free up disk space.
//!
//! ## Features
//!
//! - Detect six common project types by their marker files
//! - Remove cache directories, explicit files and extension matches
//! - Parallel processing with a configurable worker pool
//! - Dry-run mode that reports without deleting
//! - Per-project interactive confirmation
//!
//! ## Usage
//!
//! ### Command Line
//!
//! ```bash
//! # Scan and clean the current directory
//! reclaim
//!
//! # See what would be removed first
//! reclaim --dry-run
//!
//! # Confirm each project individually, two workers
//! reclaim --interactive --workers 2
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use reclaim_core::{
//!     CacheCleaner, ProjectRegistry, ProjectScanner, cleaner::CleanConfig, scanner::ScanConfig,
//! };
//! use std::path::Path;
//!
//! // Scan for projects
//! let scanner = ProjectScanner::new(ProjectRegistry::built_in(), ScanConfig::default());
//! let projects = scanner.scan(Path::new("."))?;
//!
//! // Process them (using dry_run to avoid actual deletion)
//! let mut clean_config = CleanConfig::default();
//! clean_config.dry_run = true; // Use dry run to avoid permission issues
//! let cleaner = CacheCleaner::new(ProjectRegistry::built_in(), clean_config);
//! let _ = cleaner.process_projects(&projects); // Ignore result in doc test
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export core functionality
pub use reclaim_core::*;

// Re-export commonly used types
pub use reclaim_core::{
    CacheCleaner, CacheItem, CacheSpec, CleanupStats, ItemKind, ProjectRegistry, ProjectScanner,
    ProjectType, ReclaimError, cleaner::CleanConfig, scanner::ScanConfig,
};
