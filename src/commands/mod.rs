//! CLI commands for crxgen

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::{load_config, save_config, Config, CrxgenPaths, StylesheetFlavor};
use crate::manifest::synthesize;
use crate::models::{ActionMode, AnswerSet, Permission, UiFeature};
use crate::scaffold::{self, ScaffoldOptions};

const FALLBACK_NAME: &str = "myChromeApp";

/// Answer values supplied on the command line, all optional
#[derive(Debug, Clone, Default)]
pub struct AnswerInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub action: Option<String>,
    pub ui_features: Vec<String>,
    pub permissions: Vec<String>,
    pub answers_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Fragment,
}

/// Write a default config.toml if none exists
pub fn init() -> Result<()> {
    let paths = CrxgenPaths::new()?;

    if paths.is_initialized() {
        println!("crxgen is already initialized at {}", paths.root.display());
        return Ok(());
    }

    paths.ensure_dirs()?;
    save_config(&paths, &Config::default())?;
    println!("Created {}", paths.config.display());

    Ok(())
}

/// Generate a new extension project in `dir`
pub fn new_project(dir: &Path, input: &AnswerInput, compass: bool, force: bool) -> Result<()> {
    let config = load_config(&CrxgenPaths::new()?)?;
    let fallback = project_dir_name(dir)?.unwrap_or_else(|| FALLBACK_NAME.to_string());

    let answers = collect_answers(input, &config, &fallback)?;
    let manifest = synthesize(&answers)?;
    tracing::info!(
        "synthesized manifest for '{}' with {} optional fields",
        answers.name,
        manifest.rendered_fields.len()
    );

    let options = ScaffoldOptions {
        stylesheet: if compass {
            StylesheetFlavor::Scss
        } else {
            config.stylesheet
        },
    };
    let files = scaffold::plan(&manifest, &options)?;
    let written = scaffold::write(dir, &files, force)?;

    println!("Created extension '{}' in {}", answers.name, dir.display());
    for file in &files {
        println!("  {}", file.path.display());
    }
    println!();
    println!("{} files written. Load {} as an unpacked extension.", written, dir.join("app").display());

    Ok(())
}

/// Last component of `dir` once resolved against the working directory.
///
/// `.` and `..` resolve to real directory names; `None` only for a root path.
pub fn project_dir_name(dir: &Path) -> Result<Option<String>> {
    let absolute = std::env::current_dir()
        .context("Failed to read the current directory")?
        .join(dir);
    let resolved = match fs::canonicalize(&absolute) {
        Ok(path) => path,
        // Not created yet: resolve dot components by hand
        Err(_) => absolute.components().fold(PathBuf::new(), |mut path, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    path.pop();
                }
                other => path.push(other),
            }
            path
        }),
    };
    Ok(resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string))
}

/// Print the synthesized manifest without writing anything
pub fn preview(input: &AnswerInput, format: OutputFormat) -> Result<()> {
    let config = load_config(&CrxgenPaths::new()?)?;
    let answers = collect_answers(input, &config, FALLBACK_NAME)?;
    let manifest = synthesize(&answers)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        OutputFormat::Fragment => {
            let fragment = manifest.fragment();
            if fragment.is_empty() {
                println!("(no optional manifest fields)");
            } else {
                // Drop the leading separator meant for splicing
                println!("{}", fragment.trim_start_matches(",\n"));
            }
        }
    }

    Ok(())
}

/// Build the answer set: answers file first, then flags, then config defaults
pub fn collect_answers(input: &AnswerInput, config: &Config, fallback_name: &str) -> Result<AnswerSet> {
    let base = match &input.answers_file {
        Some(path) => Some(load_answers_file(path)?),
        None => None,
    };

    let name = input
        .name
        .clone()
        .or_else(|| base.as_ref().map(|a| a.name.clone()).filter(|n| !n.trim().is_empty()))
        .or_else(|| config.defaults.name.clone())
        .unwrap_or_else(|| fallback_name.to_string());

    let description = input
        .description
        .clone()
        .or_else(|| {
            base.as_ref()
                .map(|a| a.description.clone())
                .filter(|d| !d.is_empty())
        })
        .unwrap_or_else(|| config.defaults.description.clone());

    let action = match &input.action {
        Some(a) => a.parse::<ActionMode>().map_err(|e| anyhow::anyhow!(e))?,
        None => base.as_ref().map(|a| a.action).unwrap_or_default(),
    };

    let mut answers = AnswerSet::new(name, description).with_action(action);

    if input.ui_features.is_empty() {
        if let Some(base) = &base {
            answers = answers.with_ui_features(base.ui_features.iter().copied());
        }
    } else {
        let features = input
            .ui_features
            .iter()
            .map(|f| f.parse::<UiFeature>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!(e))?;
        answers = answers.with_ui_features(features);
    }

    if input.permissions.is_empty() {
        if let Some(base) = &base {
            answers = answers.with_permissions(base.permissions.iter().copied());
        }
    } else {
        let permissions = input
            .permissions
            .iter()
            .map(|p| p.parse::<Permission>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!(e))?;
        answers = answers.with_permissions(permissions);
    }

    tracing::debug!("collected answers: {:?}", answers);
    Ok(answers)
}

/// Read an answers file, TOML or JSON depending on its extension
pub fn load_answers_file(path: &Path) -> Result<AnswerSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display())),
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display())),
        _ => bail!(
            "Unsupported answers file {}: expected a .toml or .json extension",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_answers() {
        let answers = collect_answers(&AnswerInput::default(), &Config::default(), "tab-tool").unwrap();
        assert_eq!(answers.name, "tab-tool");
        assert_eq!(answers.description, "My Chrome Extension");
        assert_eq!(answers.action, ActionMode::None);
        assert!(answers.ui_features.is_empty());
        assert!(answers.permissions.is_empty());
    }

    #[test]
    fn test_config_name_beats_fallback() {
        let mut config = Config::default();
        config.defaults.name = Some("Configured".to_string());
        let answers = collect_answers(&AnswerInput::default(), &config, "dir-name").unwrap();
        assert_eq!(answers.name, "Configured");
    }

    #[test]
    fn test_flags_override_answers_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("answers.json");
        fs::write(
            &path,
            r#"{"name": "From File", "description": "file", "action": "browser",
               "ui_features": ["omnibox"], "permissions": ["cookies"]}"#,
        )
        .unwrap();

        let input = AnswerInput {
            action: Some("page".to_string()),
            permissions: vec!["tabs".to_string(), "history".to_string()],
            answers_file: Some(path),
            ..Default::default()
        };
        let answers = collect_answers(&input, &Config::default(), "x").unwrap();

        assert_eq!(answers.name, "From File");
        assert_eq!(answers.description, "file");
        assert_eq!(answers.action, ActionMode::Page);
        assert!(answers.has_feature(UiFeature::Omnibox));
        assert!(answers.permissions.contains(&Permission::Tabs));
        assert!(!answers.permissions.contains(&Permission::Cookies));
    }

    #[test]
    fn test_invalid_flag_value_is_reported() {
        let input = AnswerInput {
            ui_features: vec!["sidebar".to_string()],
            ..Default::default()
        };
        let err = collect_answers(&input, &Config::default(), "x").unwrap_err();
        assert!(err.to_string().contains("Invalid UI feature"));
    }

    #[test]
    fn test_answers_file_without_name_uses_fallback() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("answers.toml");
        fs::write(&path, "action = \"browser\"\n").unwrap();

        let input = AnswerInput {
            answers_file: Some(path),
            ..Default::default()
        };
        let answers = collect_answers(&input, &Config::default(), "dirname").unwrap();
        assert_eq!(answers.name, "dirname");
        assert_eq!(answers.action, ActionMode::Browser);
    }

    #[test]
    fn test_dot_dir_resolves_to_real_name() {
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.file_name().and_then(|n| n.to_str()).map(str::to_string);
        assert_eq!(project_dir_name(Path::new(".")).unwrap(), expected);

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let parent = temp.path().canonicalize().unwrap();
        let expected = parent.file_name().and_then(|n| n.to_str()).map(str::to_string);
        assert_eq!(project_dir_name(&temp.path().join("sub").join("..")).unwrap(), expected);

        let missing = temp.path().join("new-ext").join(".");
        assert_eq!(project_dir_name(&missing).unwrap().as_deref(), Some("new-ext"));
    }

    #[test]
    fn test_unknown_answers_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("answers.yaml");
        fs::write(&path, "name: x").unwrap();
        assert!(load_answers_file(&path).is_err());
    }
}
