use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use reclaim_core::{
    cleaner::{CacheCleaner, CleanConfig},
    registry::ProjectRegistry,
    scanner::{ProjectScanner, ScanConfig},
};

/// 创建一个带标记文件的测试项目
fn create_project(base_path: &Path, name: &str, indicator: &str) -> PathBuf {
    let project_path = base_path.join(name);
    fs::create_dir_all(&project_path).unwrap();
    fs::write(project_path.join(indicator), "").unwrap();
    project_path
}

/// 在项目下写入一个缓存目录和一个指定大小的文件
fn add_cache_dir(project: &Path, dir_name: &str, file_name: &str, bytes: usize) -> PathBuf {
    let cache_dir = project.join(dir_name);
    fs::create_dir_all(&cache_dir).unwrap();
    fs::write(cache_dir.join(file_name), vec![0u8; bytes]).unwrap();
    cache_dir
}

fn cleaner_with(config: CleanConfig) -> CacheCleaner {
    CacheCleaner::new(ProjectRegistry::built_in(), config)
}

#[test]
fn test_end_to_end_removal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let project_a = create_project(root, "project-a", "package.json");
    add_cache_dir(&project_a, "node_modules", "x.js", 10);
    let project_b = create_project(root, "project-b", "Cargo.toml");
    add_cache_dir(&project_b, "target", "debug.bin", 20);

    let cleaner = cleaner_with(CleanConfig {
        max_depth: 5,
        ..Default::default()
    });
    let stats = cleaner.run(root)?;

    assert_eq!(stats.projects_found, 2);
    assert_eq!(stats.items_removed, 2);
    assert_eq!(stats.bytes_reclaimed, 30);

    // 缓存目录消失,标记文件原样保留
    assert!(!project_a.join("node_modules").exists());
    assert!(!project_b.join("target").exists());
    assert!(project_a.join("package.json").exists());
    assert!(project_b.join("Cargo.toml").exists());

    Ok(())
}

#[test]
fn test_end_to_end_dry_run_is_read_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let project_a = create_project(root, "project-a", "package.json");
    add_cache_dir(&project_a, "node_modules", "x.js", 10);
    let project_b = create_project(root, "project-b", "Cargo.toml");
    add_cache_dir(&project_b, "target", "debug.bin", 20);

    let cleaner = cleaner_with(CleanConfig {
        dry_run: true,
        max_depth: 5,
        ..Default::default()
    });
    let stats = cleaner.run(root)?;

    assert_eq!(stats.projects_found, 2);
    assert_eq!(stats.items_removed, 0);
    assert_eq!(stats.bytes_reclaimed, 0);
    assert!(project_a.join("node_modules").join("x.js").exists());
    assert!(project_b.join("target").join("debug.bin").exists());

    Ok(())
}

#[test]
fn test_interactive_mixed_responses() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let project_a = create_project(root, "project-a", "package.json");
    add_cache_dir(&project_a, "node_modules", "x.js", 10);
    let project_b = create_project(root, "project-b", "Cargo.toml");
    add_cache_dir(&project_b, "target", "debug.bin", 20);

    let cleaner = cleaner_with(CleanConfig {
        interactive: true,
        ..Default::default()
    });

    // project-a 拒绝,project-b 同意
    let stats = cleaner.run_with_confirm(root, |path: &Path| !path.ends_with("project-a"))?;

    assert_eq!(stats.projects_found, 2);
    assert_eq!(stats.items_removed, 1);
    assert_eq!(stats.bytes_reclaimed, 20);
    assert!(project_a.join("node_modules").exists());
    assert!(!project_b.join("target").exists());

    Ok(())
}

#[test]
fn test_tree_without_projects() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("docs").join("assets"))?;
    fs::write(root.join("docs").join("index.md"), "# hi")?;

    let cleaner = cleaner_with(CleanConfig::default());
    let stats = cleaner.run(root)?;

    assert_eq!(stats.projects_found, 0);
    assert_eq!(stats.items_removed, 0);
    assert_eq!(stats.bytes_reclaimed, 0);

    Ok(())
}

#[test]
fn test_four_project_types_in_one_tree() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let maven = create_project(root, "billing", "pom.xml");
    add_cache_dir(&maven, "target", "classes.jar", 100);

    let gradle = create_project(root, "android", "build.gradle");
    add_cache_dir(&gradle, "build", "apk.bin", 50);
    add_cache_dir(&gradle, ".gradle", "cache.lock", 5);

    let go = create_project(root, "gateway", "go.mod");
    add_cache_dir(&go, "vendor", "dep.go", 25);

    let node = create_project(root, "frontend", "yarn.lock");
    add_cache_dir(&node, "node_modules", "left-pad.js", 7);
    add_cache_dir(&node, ".next", "page.js", 3);

    let cleaner = cleaner_with(CleanConfig::default());
    let stats = cleaner.run(root)?;

    assert_eq!(stats.projects_found, 4);
    assert_eq!(stats.items_removed, 6);
    assert_eq!(stats.bytes_reclaimed, 190);
    assert!(!gradle.join(".gradle").exists());
    assert!(!node.join(".next").exists());

    Ok(())
}

#[test]
fn test_python_extension_files_removed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let py = create_project(root, "ml", "requirements.txt");
    add_cache_dir(&py, "__pycache__", "mod.cpython-312.pyc", 40);
    let pkg = py.join("src").join("pkg");
    fs::create_dir_all(&pkg)?;
    fs::write(pkg.join("old.pyc"), vec![0u8; 6])?;
    fs::write(pkg.join("old.pyo"), vec![0u8; 4])?;
    fs::write(pkg.join("keep.py"), "x = 1")?;

    let cleaner = cleaner_with(CleanConfig::default());
    let stats = cleaner.run(root)?;

    assert_eq!(stats.projects_found, 1);
    // __pycache__ 整体一条,外加两个匹配扩展名的文件
    assert_eq!(stats.items_removed, 3);
    assert_eq!(stats.bytes_reclaimed, 50);
    assert!(!py.join("__pycache__").exists());
    assert!(!pkg.join("old.pyc").exists());
    assert!(!pkg.join("old.pyo").exists());
    assert!(pkg.join("keep.py").exists());

    Ok(())
}

#[test]
fn test_hidden_and_deep_projects_left_alone() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    // 隐藏目录里的项目不该被发现
    let hidden_base = root.join(".archive");
    fs::create_dir_all(&hidden_base)?;
    let hidden = create_project(&hidden_base, "old", "Cargo.toml");
    let hidden_cache = add_cache_dir(&hidden, "target", "bin", 11);

    // 深度超限的项目同样不该被发现
    let deep_base = root.join("l1").join("l2").join("l3");
    fs::create_dir_all(&deep_base)?;
    let deep = create_project(&deep_base, "buried", "Cargo.toml");
    let deep_cache = add_cache_dir(&deep, "target", "bin", 13);

    let reachable = create_project(root, "near", "Cargo.toml");
    add_cache_dir(&reachable, "target", "bin", 17);

    let cleaner = cleaner_with(CleanConfig {
        max_depth: 2,
        ..Default::default()
    });
    let stats = cleaner.run(root)?;

    assert_eq!(stats.projects_found, 1);
    assert_eq!(stats.bytes_reclaimed, 17);
    assert!(hidden_cache.exists());
    assert!(deep_cache.exists());

    Ok(())
}

#[test]
fn test_scanner_and_cleaner_compose() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let project = create_project(root, "svc", "go.sum");
    add_cache_dir(&project, "vendor", "pkg.go", 9);

    // 调用方自行扫描,再把项目列表交给清理器
    let scanner = ProjectScanner::new(ProjectRegistry::built_in(), ScanConfig::default());
    let projects = scanner.scan(root)?;
    assert_eq!(projects.len(), 1);

    let cleaner = cleaner_with(CleanConfig::default());
    let (items, bytes) = cleaner.process_projects(&projects)?;

    assert_eq!(items, 1);
    assert_eq!(bytes, 9);
    assert!(!project.join("vendor").exists());

    Ok(())
}
