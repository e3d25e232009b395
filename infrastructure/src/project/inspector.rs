//! Local file system project inspector

use crate::config::FileProjectConfig;
use async_trait::async_trait;
use buildpath_application::ports::project_inspector::{InspectorError, ProjectInspector};
use buildpath_domain::util::truncate_str;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Maximum command output returned (100 KB)
const MAX_OUTPUT_SIZE: usize = 100 * 1024;

/// Hidden entries still shown in the tree
const VISIBLE_DOTFILES: &[&str] = &[".env.example"];

/// [`ProjectInspector`] over a directory on the local disk.
///
/// All paths are relative to the project root; anything that would resolve
/// outside it is refused.
#[derive(Debug, Clone)]
pub struct LocalProjectInspector {
    root: PathBuf,
    settings: FileProjectConfig,
}

impl LocalProjectInspector {
    pub fn new(root: impl Into<PathBuf>, settings: FileProjectConfig) -> Self {
        let root = root.into();
        let root = root.canonicalize().unwrap_or(root);
        debug!("Project directory: {}", root.display());
        Self { root, settings }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.settings.ignore_dirs.iter().any(|d| d == name) || name.ends_with(".egg-info")
    }

    fn render_tree(&self) -> String {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        let mut lines = vec![format!("{name}/")];
        self.walk(&self.root, "  ", 0, &mut lines);
        if lines.len() == 1 {
            "(empty project)".to_string()
        } else {
            lines.join("\n")
        }
    }

    fn walk(&self, dir: &Path, prefix: &str, depth: usize, lines: &mut Vec<String>) {
        if depth >= self.settings.max_tree_depth {
            return;
        }
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        let mut items: Vec<(bool, String, PathBuf)> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let path = e.path();
                (path.is_file(), e.file_name().to_string_lossy().into_owned(), path)
            })
            .filter(|(_, name, _)| {
                (!name.starts_with('.') || VISIBLE_DOTFILES.contains(&name.as_str()))
                    && !self.is_ignored(name)
            })
            .collect();
        // Directories first, then by name
        items.sort();

        for (is_file, name, path) in items {
            if is_file {
                lines.push(format!("{prefix}{name}"));
            } else {
                lines.push(format!("{prefix}{name}/"));
                self.walk(&path, &format!("{prefix}  "), depth + 1, lines);
            }
        }
    }

    fn config_files(&self) -> String {
        let configs: Vec<String> = self
            .settings
            .config_files
            .iter()
            .filter_map(|name| {
                let content = fs::read_to_string(self.root.join(name)).ok()?;
                Some(format!("{name}:\n```\n{content}\n```"))
            })
            .collect();
        if configs.is_empty() {
            "(no config files yet)".to_string()
        } else {
            configs.join("\n\n")
        }
    }

    fn source_files(&self) -> String {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let mut paths: Vec<PathBuf> = self
            .settings
            .source_extensions
            .iter()
            .filter_map(|ext| {
                let pattern = format!("{root}/**/*.{}", ext.trim_start_matches('.'));
                match glob::glob(&pattern) {
                    Ok(paths) => Some(paths),
                    Err(e) => {
                        warn!("Invalid source pattern {}: {}", pattern, e);
                        None
                    }
                }
            })
            .flatten()
            .filter_map(Result::ok)
            .filter(|path| {
                path.strip_prefix(&self.root).is_ok_and(|rel| {
                    rel.components().all(|c| {
                        let name = c.as_os_str().to_string_lossy();
                        !self.is_ignored(&name) && !name.starts_with('.')
                    })
                })
            })
            .collect();
        paths.sort();
        paths.dedup();

        let files: Vec<String> = paths
            .iter()
            .filter_map(|path| {
                let content = fs::read_to_string(path).ok()?;
                let relative = path.strip_prefix(&self.root).ok()?;
                let lang = path.extension().map(|e| e.to_string_lossy()).unwrap_or_default();
                Some(format!("{}:\n```{lang}\n{content}\n```", relative.display()))
            })
            .collect();

        if files.is_empty() {
            "(no source files yet)".to_string()
        } else {
            files.join("\n\n")
        }
    }

    /// Resolve `relative` inside the root, refusing escapes.
    fn resolve(&self, relative: &str) -> Result<PathBuf, InspectorError> {
        let candidate = Path::new(relative.trim());
        let escapes = candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(InspectorError::OutsideProject(relative.to_string()));
        }

        let path = self.root.join(candidate);
        if !path.exists() {
            return Err(InspectorError::NotFound(relative.to_string()));
        }
        // Symlinks may still point elsewhere
        let canonical = path
            .canonicalize()
            .map_err(|e| InspectorError::Io(e.to_string()))?;
        if !canonical.starts_with(&self.root) {
            return Err(InspectorError::OutsideProject(relative.to_string()));
        }
        if !canonical.is_file() {
            return Err(InspectorError::NotFound(format!("{relative} (not a file)")));
        }
        Ok(canonical)
    }
}

#[async_trait]
impl ProjectInspector for LocalProjectInspector {
    async fn full_context(&self) -> Result<String, InspectorError> {
        if !self.root.is_dir() {
            return Err(InspectorError::NotFound(self.root.display().to_string()));
        }
        Ok(format!(
            "PROJECT STRUCTURE:\n{}\n\nCONFIG FILES:\n{}\n\nSOURCE CODE:\n{}",
            self.render_tree(),
            self.config_files(),
            self.source_files()
        ))
    }

    async fn tree(&self) -> Result<String, InspectorError> {
        if !self.root.is_dir() {
            return Err(InspectorError::NotFound(self.root.display().to_string()));
        }
        Ok(self.render_tree())
    }

    async fn read_file(&self, path: &str) -> Result<String, InspectorError> {
        let resolved = self.resolve(path)?;
        tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|e| InspectorError::Io(format!("{path}: {e}")))
    }

    async fn run(&self, command: &str) -> Result<String, InspectorError> {
        let secs = self.settings.command_timeout_secs;
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        };
        cmd.current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running in {}: {}", self.root.display(), command);
        let output = match tokio::time::timeout(Duration::from_secs(secs), cmd.output()).await {
            Ok(result) => result.map_err(|e| InspectorError::Io(e.to_string()))?,
            Err(_) => {
                return Err(InspectorError::Timeout {
                    command: command.to_string(),
                    secs,
                });
            }
        };

        let mut combined = String::new();
        for stream in [&output.stdout, &output.stderr] {
            let text = String::from_utf8_lossy(stream);
            if !text.trim().is_empty() {
                combined.push_str(text.trim_end());
                combined.push('\n');
            }
        }
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            combined.push_str(&format!("(Exit code: {code})"));
        }

        let combined = combined.trim();
        if combined.is_empty() {
            return Ok("Command completed (no output)".to_string());
        }
        if combined.len() > MAX_OUTPUT_SIZE {
            return Ok(format!(
                "{}\n... (output truncated)",
                truncate_str(combined, MAX_OUTPUT_SIZE)
            ));
        }
        Ok(combined.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> (TempDir, LocalProjectInspector) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/pkg")).unwrap();
        fs::create_dir_all(root.join("__pycache__")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("pyproject.toml"), "[project]\nname = \"demo\"").unwrap();
        fs::write(root.join("src/pkg/cli.py"), "def main() -> None: ...").unwrap();
        fs::write(root.join("__pycache__/cli.py"), "compiled").unwrap();
        fs::write(root.join("README.md"), "# demo").unwrap();
        let inspector = LocalProjectInspector::new(root, FileProjectConfig::default());
        (dir, inspector)
    }

    #[tokio::test]
    async fn test_tree_lists_dirs_first_and_skips_ignored() {
        let (_dir, inspector) = project();
        let tree = inspector.tree().await.unwrap();
        let lines: Vec<&str> = tree.lines().collect();

        assert_eq!(lines[1], "  src/");
        assert!(tree.contains("      cli.py"));
        assert!(tree.contains("  pyproject.toml"));
        assert!(!tree.contains("__pycache__"));
        assert!(!tree.contains(".git"));
    }

    #[tokio::test]
    async fn test_tree_respects_depth() {
        let (dir, _) = project();
        let settings = FileProjectConfig {
            max_tree_depth: 1,
            ..Default::default()
        };
        let shallow = LocalProjectInspector::new(dir.path(), settings);
        let tree = shallow.tree().await.unwrap();
        assert!(tree.contains("src/"));
        assert!(!tree.contains("pkg/"));
    }

    #[tokio::test]
    async fn test_full_context_has_config_and_sources() {
        let (_dir, inspector) = project();
        let context = inspector.full_context().await.unwrap();
        assert!(context.contains("CONFIG FILES:\npyproject.toml:"));
        assert!(context.contains("def main() -> None"));
        assert!(!context.contains("compiled"));
    }

    #[tokio::test]
    async fn test_empty_project() {
        let dir = tempfile::tempdir().unwrap();
        let inspector = LocalProjectInspector::new(dir.path(), FileProjectConfig::default());
        let context = inspector.full_context().await.unwrap();
        assert!(context.contains("(empty project)"));
        assert!(context.contains("(no source files yet)"));
    }

    #[tokio::test]
    async fn test_read_file() {
        let (_dir, inspector) = project();
        assert_eq!(
            inspector.read_file("src/pkg/cli.py").await.unwrap(),
            "def main() -> None: ..."
        );
        assert!(matches!(
            inspector.read_file("src/missing.py").await,
            Err(InspectorError::NotFound(_))
        ));
        assert!(matches!(
            inspector.read_file("src").await,
            Err(InspectorError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_read_file_refuses_escape() {
        let (_dir, inspector) = project();
        assert!(matches!(
            inspector.read_file("../etc/passwd").await,
            Err(InspectorError::OutsideProject(_))
        ));
        assert!(matches!(
            inspector.read_file("/etc/passwd").await,
            Err(InspectorError::OutsideProject(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let (_dir, inspector) = project();
        assert_eq!(inspector.run("echo hello").await.unwrap(), "hello");
        let failed = inspector.run("echo oops >&2; exit 3").await.unwrap();
        assert!(failed.contains("oops"));
        assert!(failed.ends_with("(Exit code: 3)"));
        assert_eq!(
            inspector.run("true").await.unwrap(),
            "Command completed (no output)"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let (dir, _) = project();
        let settings = FileProjectConfig {
            command_timeout_secs: 1,
            ..Default::default()
        };
        let inspector = LocalProjectInspector::new(dir.path(), settings);
        let err = inspector.run("sleep 5").await.unwrap_err();
        assert!(matches!(err, InspectorError::Timeout { secs: 1, .. }));
    }
}
