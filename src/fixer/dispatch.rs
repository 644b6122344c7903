//! Decide which fixers a document gets.

use crate::config::GuardianConfig;
use crate::document::Document;
use crate::workspace::{Workspace, ESLINT_BIN, PHPCBF_BIN};

use super::invocation::{FixInvocation, Tool};

/// Plan the fixer runs for a document.
///
/// A document outside every workspace folder gets none. The PHP and
/// script checks are independent; with the current tag set at most one
/// matches.
pub fn plan(
    document: &Document,
    workspace: &Workspace,
    config: &GuardianConfig,
) -> Vec<FixInvocation> {
    let Some(folder) = workspace.folder_for(&document.path) else {
        tracing::debug!(
            "{} is outside the workspace, nothing to fix",
            document.path.display()
        );
        return Vec::new();
    };

    let mut invocations = Vec::new();

    if document.language.is_php() && config.php.enabled {
        invocations.push(FixInvocation {
            tool: Tool::Phpcbf,
            program: folder.join(PHPCBF_BIN),
            args: vec![format!("--standard={}", config.php.standard)],
            file: document.path.clone(),
            cwd: folder.to_path_buf(),
        });
    }

    if document.language.is_lintable_script() && config.javascript.enabled {
        invocations.push(FixInvocation {
            tool: Tool::Eslint,
            program: folder.join(ESLINT_BIN),
            args: vec!["--fix".to_string()],
            file: document.path.clone(),
            cwd: folder.to_path_buf(),
        });
    }

    if invocations.is_empty() {
        tracing::trace!(
            "No fixer for {} ({})",
            document.path.display(),
            document.language
        );
    }

    invocations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Language;
    use std::path::PathBuf;

    fn proj() -> Workspace {
        Workspace::new([PathBuf::from("/proj")])
    }

    #[test]
    fn php_gets_one_phpcbf_run() {
        let doc = Document::new("/proj/src/Foo.php", Language::Php);
        let plan = plan(&doc, &proj(), &GuardianConfig::default());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].tool, Tool::Phpcbf);
        assert_eq!(
            plan[0].command_line(),
            r#""/proj/vendor/bin/phpcbf" --standard=WordPress "/proj/src/Foo.php""#
        );
        assert_eq!(plan[0].cwd, PathBuf::from("/proj"));
    }

    #[test]
    fn every_script_tag_gets_one_eslint_run() {
        for (path, lang) in [
            ("/proj/a.js", Language::JavaScript),
            ("/proj/a.jsx", Language::JavaScriptReact),
            ("/proj/src/App.tsx", Language::TypeScriptReact),
        ] {
            let doc = Document::new(path, lang);
            let plan = plan(&doc, &proj(), &GuardianConfig::default());

            assert_eq!(plan.len(), 1, "{path}");
            assert_eq!(plan[0].tool, Tool::Eslint);
            assert_eq!(plan[0].args, vec!["--fix"]);
            assert_eq!(plan[0].file, PathBuf::from(path));
            assert_eq!(
                plan[0].program,
                PathBuf::from("/proj/node_modules/.bin/eslint")
            );
        }
    }

    #[test]
    fn other_tags_get_nothing() {
        for tag in ["markdown", "typescript", "css", "json"] {
            let doc = Document::new("/proj/README.md", Language::from_tag(tag));
            assert!(plan(&doc, &proj(), &GuardianConfig::default()).is_empty());
        }
    }

    #[test]
    fn outside_workspace_gets_nothing() {
        let doc = Document::new("/elsewhere/Foo.php", Language::Php);
        assert!(plan(&doc, &proj(), &GuardianConfig::default()).is_empty());
    }

    #[test]
    fn empty_workspace_gets_nothing() {
        let doc = Document::new("/proj/Foo.php", Language::Php);
        assert!(plan(&doc, &Workspace::empty(), &GuardianConfig::default()).is_empty());
    }

    #[test]
    fn binaries_resolve_against_owning_folder() {
        let ws = Workspace::new([PathBuf::from("/proj"), PathBuf::from("/proj/plugin")]);
        let doc = Document::new("/proj/plugin/inc/a.php", Language::Php);
        let plan = plan(&doc, &ws, &GuardianConfig::default());

        assert_eq!(
            plan[0].program,
            PathBuf::from("/proj/plugin/vendor/bin/phpcbf")
        );
    }

    #[test]
    fn configured_standard_is_used() {
        let mut config = GuardianConfig::default();
        config.php.standard = "WordPress-Extra".to_string();
        let doc = Document::new("/proj/a.php", Language::Php);

        assert_eq!(
            plan(&doc, &proj(), &config)[0].args,
            vec!["--standard=WordPress-Extra"]
        );
    }

    #[test]
    fn disabled_tools_are_skipped() {
        let mut config = GuardianConfig::default();
        config.php.enabled = false;
        config.javascript.enabled = false;

        let php = Document::new("/proj/a.php", Language::Php);
        let js = Document::new("/proj/a.js", Language::JavaScript);
        assert!(plan(&php, &proj(), &config).is_empty());
        assert!(plan(&js, &proj(), &config).is_empty());
    }
}
