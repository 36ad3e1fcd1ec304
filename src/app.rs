use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub robot: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let project_root = Self::find_project_root()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;

        Ok(Self {
            project_root,
            config,
            robot: cli.robot,
        })
    }

    /// Resolve a configured path against the project root.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    fn find_project_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("LORE_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        Ok(find_upwards(&cwd, "lore.toml").unwrap_or(cwd))
    }
}

/// The nearest ancestor of `start` (inclusive) containing `name`.
fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(name).is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_marker_in_ancestor() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("lore.toml"), "").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_upwards(&nested, "lore.toml"), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn missing_marker_yields_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find_upwards(temp.path(), "lore-marker-that-does-not-exist.toml"), None);
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let ctx = AppContext {
            project_root: PathBuf::from("/root/project"),
            config: Config::default(),
            robot: false,
        };
        assert_eq!(ctx.resolve_path(Path::new("data")), PathBuf::from("/root/project/data"));
        assert_eq!(ctx.resolve_path(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
