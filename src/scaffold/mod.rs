//! Project scaffolding
//!
//! Plans the generated file tree from a `ManifestConfig`, then writes it out.
//! Planning is pure so the full tree can be previewed and tested without disk.

pub mod templates;

use anyhow::{bail, Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StylesheetFlavor;
use crate::manifest::ManifestConfig;
use crate::models::ActionMode;

/// Options that shape the file tree but not the manifest
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    pub stylesheet: StylesheetFlavor,
}

/// A file to be written, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: Cow<'static, [u8]>,
}

impl GeneratedFile {
    fn text(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: Cow::Owned(contents.into().into_bytes()),
        }
    }

    fn binary(path: impl Into<PathBuf>, contents: &'static [u8]) -> Self {
        Self {
            path: path.into(),
            contents: Cow::Borrowed(contents),
        }
    }

    /// Contents as UTF-8, `None` for binary files
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}

/// Lowercase package name with runs of other characters collapsed to '-'
pub fn package_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("extension");
    }
    slug
}

/// Plan every file of the generated project
pub fn plan(config: &ManifestConfig, options: &ScaffoldOptions) -> Result<Vec<GeneratedFile>> {
    let manifest = templates::generate_manifest_json(&config.fragment());
    crate::validation::validate_manifest(&manifest)
        .context("Generated manifest.json failed validation")?;

    let messages = templates::generate_messages_json(&config.raw_name, &config.raw_description)
        .context("Failed to render messages.json")?;
    serde_json::from_str::<serde_json::Value>(&messages)
        .context("Generated messages.json is not valid JSON")?;

    let package = package_name(&config.raw_name);
    let mut files = vec![
        GeneratedFile::text(
            "package.json",
            templates::generate_package_json(&package, options.stylesheet)
                .context("Failed to render package.json")?,
        ),
        GeneratedFile::text(
            "bower.json",
            templates::generate_bower_json(&package).context("Failed to render bower.json")?,
        ),
        GeneratedFile::text("Gruntfile.js", templates::generate_gruntfile(options.stylesheet)),
        GeneratedFile::text("app/manifest.json", manifest),
        GeneratedFile::text("app/_locales/en/messages.json", messages),
        GeneratedFile::text("app/scripts/background.js", templates::background_js(config.action)),
        GeneratedFile::text("app/scripts/chromereload.js", templates::CHROMERELOAD_JS),
    ];

    for (path, bytes) in templates::APP_ICONS {
        files.push(GeneratedFile::binary(format!("app/{}", path), bytes));
    }

    if config.action != ActionMode::None {
        files.push(GeneratedFile::text("app/popup.html", templates::POPUP_HTML));
        files.push(GeneratedFile::text("app/scripts/popup.js", templates::POPUP_JS));
        for (path, bytes) in templates::ACTION_ICONS {
            files.push(GeneratedFile::binary(format!("app/{}", path), bytes));
        }
    }

    if config.has_options_page {
        files.push(GeneratedFile::text("app/options.html", templates::OPTIONS_HTML));
        files.push(GeneratedFile::text("app/scripts/options.js", templates::OPTIONS_JS));
    }

    if config.has_content_script {
        files.push(GeneratedFile::text("app/scripts/contentscript.js", templates::CONTENTSCRIPT_JS));
    }

    if config.needs_stylesheet() {
        let path = format!("app/styles/main.{}", options.stylesheet.extension());
        files.push(GeneratedFile::text(path, templates::main_stylesheet(options.stylesheet)));
    }

    Ok(files)
}

/// Write planned files under `root`, returning how many were written.
///
/// Existing files are left alone and reported as an error unless `overwrite`
/// is set; the check runs before anything is written.
pub fn write(root: &Path, files: &[GeneratedFile], overwrite: bool) -> Result<usize> {
    if !overwrite {
        let existing: Vec<String> = files
            .iter()
            .filter(|f| root.join(&f.path).exists())
            .map(|f| f.path.display().to_string())
            .collect();
        if !existing.is_empty() {
            bail!(
                "Refusing to overwrite existing files in {}: {} (use --force)",
                root.display(),
                existing.join(", ")
            );
        }
    }

    for file in files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&target, &file.contents)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        tracing::debug!("wrote {}", target.display());
    }

    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::synthesize;
    use crate::models::{AnswerSet, Permission, UiFeature};

    fn paths(files: &[GeneratedFile]) -> Vec<String> {
        files.iter().map(|f| f.path.display().to_string()).collect()
    }

    fn text<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
        files
            .iter()
            .find(|f| f.path == Path::new(path))
            .and_then(|f| f.as_text())
            .unwrap_or_else(|| panic!("missing text file {}", path))
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name(r#"My "Cool" Ext"#), "my-cool-ext");
        assert_eq!(package_name("  tab--hoarder 2 "), "tab-hoarder-2");
        assert_eq!(package_name("日本"), "extension");
    }

    #[test]
    fn test_minimal_plan() {
        let config = synthesize(&AnswerSet::new("Plain", "desc")).unwrap();
        let files = plan(&config, &ScaffoldOptions::default()).unwrap();
        assert_eq!(
            paths(&files),
            vec![
                "package.json",
                "bower.json",
                "Gruntfile.js",
                "app/manifest.json",
                "app/_locales/en/messages.json",
                "app/scripts/background.js",
                "app/scripts/chromereload.js",
                "app/images/icon-16.png",
                "app/images/icon-128.png",
            ]
        );
        assert!(text(&files, "app/manifest.json").ends_with("  }\n}\n"));
    }

    #[test]
    fn test_background_follows_action() {
        let config =
            synthesize(&AnswerSet::new("x", "").with_action(ActionMode::Page)).unwrap();
        let files = plan(&config, &ScaffoldOptions::default()).unwrap();
        assert!(text(&files, "app/scripts/background.js").contains("chrome.pageAction.show"));
        let planned = paths(&files);
        for path in [
            "app/popup.html",
            "app/styles/main.css",
            "app/images/icon-19.png",
            "app/images/icon-38.png",
        ] {
            assert!(planned.contains(&path.to_string()), "missing {}", path);
        }
    }

    #[test]
    fn test_icons_are_binary() {
        let config =
            synthesize(&AnswerSet::new("x", "").with_action(ActionMode::Browser)).unwrap();
        let files = plan(&config, &ScaffoldOptions::default()).unwrap();
        let icons: Vec<&GeneratedFile> = files
            .iter()
            .filter(|f| f.path.extension().map_or(false, |e| e == "png"))
            .collect();
        assert_eq!(icons.len(), 4);
        assert!(icons.iter().all(|f| f.contents.starts_with(b"\x89PNG")));
    }

    #[test]
    fn test_scss_flavor() {
        let answers = AnswerSet::new("x", "").with_ui_features([UiFeature::OptionsPage]);
        let config = synthesize(&answers).unwrap();
        let options = ScaffoldOptions {
            stylesheet: StylesheetFlavor::Scss,
        };
        let files = plan(&config, &options).unwrap();
        assert!(paths(&files).contains(&"app/styles/main.scss".to_string()));
        assert!(!paths(&files).contains(&"app/styles/main.css".to_string()));
        assert!(text(&files, "Gruntfile.js").contains("compass"));
    }

    #[test]
    fn test_messages_json_survives_backslashes() {
        let config = synthesize(&AnswerSet::new(r"C:\path Ext", "ends with \\")).unwrap();
        let files = plan(&config, &ScaffoldOptions::default()).unwrap();
        let messages: serde_json::Value =
            serde_json::from_str(text(&files, "app/_locales/en/messages.json")).unwrap();
        assert_eq!(messages["appName"]["message"], r"C:\path Ext");
        assert_eq!(messages["appDescription"]["message"], "ends with \\");
    }

    #[test]
    fn test_manifest_contains_spliced_fields() {
        let answers = AnswerSet::new("x", "")
            .with_action(ActionMode::Browser)
            .with_permissions([Permission::Tabs]);
        let config = synthesize(&answers).unwrap();
        let files = plan(&config, &ScaffoldOptions::default()).unwrap();
        let manifest: serde_json::Value =
            serde_json::from_str(text(&files, "app/manifest.json")).unwrap();
        assert_eq!(manifest["browser_action"]["default_popup"], "popup.html");
        assert_eq!(manifest["permissions"][2], "https://*/*");
    }
}
