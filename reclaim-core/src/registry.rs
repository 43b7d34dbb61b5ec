use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a project type allows us to delete: directory names, file names
/// and file extensions, all relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSpec {
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub extensions: Vec<String>,
}

impl CacheSpec {
    pub fn new(directories: &[&str], files: &[&str], extensions: &[&str]) -> Self {
        Self {
            directories: to_owned(directories),
            files: to_owned(files),
            extensions: to_owned(extensions),
        }
    }
}

/// 项目类型定义:识别标记文件 + 对应的缓存清单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectType {
    pub name: String,
    pub indicators: Vec<String>,
    pub cache: CacheSpec,
}

impl ProjectType {
    pub fn new(name: &str, indicators: &[&str], cache: CacheSpec) -> Self {
        Self {
            name: name.to_string(),
            indicators: to_owned(indicators),
            cache,
        }
    }

    /// Whether any indicator file exists directly inside `dir`.
    ///
    /// Existence only; the indicator's content is never inspected.
    pub fn matches(&self, dir: &Path) -> bool {
        self.indicators.iter().any(|name| dir.join(name).exists())
    }
}

/// Ordered table of known project types.
///
/// Detection is a linear scan in declaration order and the first match
/// wins, so a directory carrying markers of several ecosystems is
/// classified deterministically. The table is a plain value: tests and
/// embedders can pass a substitute registry instead of the built-in one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRegistry {
    types: Vec<ProjectType>,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::built_in()
    }
}

impl ProjectRegistry {
    pub fn new(types: Vec<ProjectType>) -> Self {
        Self { types }
    }

    /// 内置的六种项目类型,顺序即优先级
    pub fn built_in() -> Self {
        Self::new(vec![
            ProjectType::new(
                "Node.js",
                &["package.json", "yarn.lock", "package-lock.json"],
                CacheSpec::new(
                    &["node_modules", "dist", "build", ".next", ".nuxt", "coverage"],
                    &[],
                    &[],
                ),
            ),
            ProjectType::new(
                "Python",
                &["requirements.txt", "setup.py", "pyproject.toml", "Pipfile"],
                CacheSpec::new(
                    &[
                        "__pycache__",
                        ".pytest_cache",
                        "dist",
                        "build",
                        ".mypy_cache",
                        ".tox",
                        "venv",
                        ".venv",
                    ],
                    &[],
                    &[".pyc", ".pyo"],
                ),
            ),
            ProjectType::new(
                "Java/Maven",
                &["pom.xml"],
                CacheSpec::new(&["target"], &[], &[]),
            ),
            ProjectType::new(
                "Gradle",
                &["build.gradle", "build.gradle.kts"],
                CacheSpec::new(&["build", ".gradle"], &[], &[]),
            ),
            ProjectType::new("Go", &["go.mod", "go.sum"], CacheSpec::new(&["vendor"], &[], &[])),
            ProjectType::new("Rust", &["Cargo.toml"], CacheSpec::new(&["target"], &[], &[])),
        ])
    }

    pub fn types(&self) -> &[ProjectType] {
        &self.types
    }

    /// Resolve the project type of `dir`, first match in table order.
    ///
    /// The filesystem is probed at call time; results are never cached.
    pub fn detect(&self, dir: &Path) -> Option<&ProjectType> {
        self.types.iter().find(|t| t.matches(dir))
    }

    /// Whether `dir` is a project root of any known type.
    pub fn is_project_root(&self, dir: &Path) -> bool {
        self.detect(dir).is_some()
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}
