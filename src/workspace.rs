//! Workspace folders and project-root discovery.
//!
//! A [`Workspace`] is the set of folders the guardian treats as project
//! boundaries. Tool binaries and config files are always resolved relative
//! to a workspace folder, never from a global install.

use std::path::{Path, PathBuf};

/// Sniffer binary whose presence signals that the PHP standards are installed.
pub const PHPCS_BIN: &str = "vendor/bin/phpcs";

/// Style-fixer binary.
pub const PHPCBF_BIN: &str = "vendor/bin/phpcbf";

/// Linter binary.
pub const ESLINT_BIN: &str = "node_modules/.bin/eslint";

/// PHP ruleset written at the workspace root.
pub const PHPCS_CONFIG: &str = "phpcs.xml";

/// ESLint config written at the workspace root.
pub const ESLINT_CONFIG: &str = ".eslintrc.json";

/// Guardian's own optional config file.
pub const GUARDIAN_CONFIG: &str = ".wp-guardian.yml";

/// Files or directories whose presence marks a project root.
const ROOT_MARKERS: &[&str] = &[GUARDIAN_CONFIG, "composer.json", "package.json", ".git"];

/// The folders open in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    /// Create a workspace from folders. Relative folders are made absolute.
    pub fn new(folders: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            folders: folders.into_iter().map(|f| absolutize(&f)).collect(),
        }
    }

    /// A workspace with nothing open.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Discover the workspace from a starting directory.
    ///
    /// Empty when no project root is found above `start`.
    pub fn discover(start: &Path) -> Self {
        match find_project_root(&absolutize(start)) {
            Some(root) => Self::new([root]),
            None => Self::empty(),
        }
    }

    /// All folders, in the order they were opened.
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Check whether any folder is open.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// The primary folder, used for setup.
    pub fn root(&self) -> Option<&Path> {
        self.folders.first().map(PathBuf::as_path)
    }

    /// The innermost folder that contains `path`.
    pub fn folder_for(&self, path: &Path) -> Option<&Path> {
        let path = absolutize(path);
        self.folders
            .iter()
            .filter(|folder| path.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .map(PathBuf::as_path)
    }
}

/// Find the project root by walking up from `start`.
///
/// The first directory holding `.wp-guardian.yml`, `composer.json`,
/// `package.json` or `.git` wins.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if ROOT_MARKERS.iter().any(|m| current.join(m).exists()) {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

pub(crate) fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_workspace_has_no_root() {
        let ws = Workspace::empty();
        assert!(ws.is_empty());
        assert!(ws.root().is_none());
        assert!(ws.folder_for(Path::new("/proj/a.php")).is_none());
    }

    #[test]
    fn root_is_first_folder() {
        let ws = Workspace::new([PathBuf::from("/proj"), PathBuf::from("/other")]);
        assert_eq!(ws.root(), Some(Path::new("/proj")));
    }

    #[test]
    fn folder_for_matches_containing_folder() {
        let ws = Workspace::new([PathBuf::from("/proj"), PathBuf::from("/other")]);
        assert_eq!(
            ws.folder_for(Path::new("/other/src/app.js")),
            Some(Path::new("/other"))
        );
    }

    #[test]
    fn folder_for_prefers_innermost_folder() {
        let ws = Workspace::new([PathBuf::from("/proj"), PathBuf::from("/proj/plugin")]);
        assert_eq!(
            ws.folder_for(Path::new("/proj/plugin/main.php")),
            Some(Path::new("/proj/plugin"))
        );
    }

    #[test]
    fn folder_for_ignores_sibling_prefixes() {
        let ws = Workspace::new([PathBuf::from("/proj")]);
        assert!(ws.folder_for(Path::new("/project/a.php")).is_none());
    }

    #[test]
    fn find_project_root_walks_up_to_marker() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("composer.json"), "{}").unwrap();
        let nested = temp.path().join("src").join("inc");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_stops_at_nearest_marker() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let theme = temp.path().join("theme");
        fs::create_dir_all(&theme).unwrap();
        fs::write(theme.join("package.json"), "{}").unwrap();

        assert_eq!(find_project_root(&theme), Some(theme));
    }

    #[test]
    fn discover_uses_project_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(GUARDIAN_CONFIG), "").unwrap();
        let ws = Workspace::discover(temp.path());
        assert_eq!(ws.root(), Some(temp.path()));
    }
}
