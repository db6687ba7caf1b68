//! Manifest synthesis
//!
//! Maps an `AnswerSet` to a `ManifestConfig`: escaped text for template
//! splicing, feature flags, and the optional manifest fields pre-serialized
//! in a fixed emission order:
//! - browser_action / page_action
//! - options_page
//! - omnibox
//! - content_scripts
//! - permissions

pub mod format;

use crate::models::{ActionMode, AnswerSet, Permission, UiFeature};
use serde::Serialize;
use std::collections::BTreeMap;

/// Indentation level of a top-level manifest key
const FIELD_LEVEL: usize = 1;

const OPTIONS_PAGE: &str = "options.html";
const POPUP_PAGE: &str = "popup.html";
const ALL_HTTP: &str = "http://*/*";
const ALL_HTTPS: &str = "https://*/*";

/// Synthesis error
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Extension name must not be empty")]
    EmptyName,

    #[error("Failed to serialize manifest field '{field}': {source}")]
    Serialize {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct ActionIcons {
    #[serde(rename = "19")]
    small: &'static str,
    #[serde(rename = "38")]
    large: &'static str,
}

#[derive(Serialize)]
struct ActionField<'a> {
    default_icon: ActionIcons,
    default_title: &'a str,
    default_popup: &'static str,
}

#[derive(Serialize)]
struct OmniboxField<'a> {
    keyword: &'a str,
}

#[derive(Serialize)]
struct ContentScriptField {
    matches: [&'static str; 2],
    css: [&'static str; 1],
    js: [&'static str; 1],
    run_at: &'static str,
    all_frames: bool,
}

/// One optional manifest field, value already serialized at field depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub key: &'static str,
    pub value: String,
}

impl std::fmt::Display for RenderedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\": {}", self.key, self.value)
    }
}

/// Everything the templates need to know about the extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestConfig {
    /// Name with double quotes escaped
    pub name: String,
    /// Description with double quotes escaped
    pub description: String,
    /// Name as answered, for serializers that do their own escaping
    pub raw_name: String,
    pub raw_description: String,
    pub action: ActionMode,
    pub has_options_page: bool,
    pub has_omnibox: bool,
    pub has_content_script: bool,
    /// One entry per known permission
    pub permission_flags: BTreeMap<Permission, bool>,
    pub rendered_fields: Vec<RenderedField>,
}

impl ManifestConfig {
    pub fn permission(&self, permission: Permission) -> bool {
        self.permission_flags.get(&permission).copied().unwrap_or(false)
    }

    /// Whether the generated project needs a main stylesheet
    pub fn needs_stylesheet(&self) -> bool {
        self.action != ActionMode::None || self.has_options_page
    }

    /// Text block appended after the last fixed manifest field.
    ///
    /// Empty when no optional field is active, otherwise `,\n` followed by the
    /// rendered fields, one per line at field depth, joined by `,\n`.
    pub fn fragment(&self) -> String {
        if self.rendered_fields.is_empty() {
            return String::new();
        }

        let items: Vec<String> = self
            .rendered_fields
            .iter()
            .map(|field| format!("  {}", field))
            .collect();
        format!(",\n{}", items.join(",\n"))
    }
}

/// Escape double quotes with a backslash
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn render<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<RenderedField, SynthesisError> {
    let value = format::to_nested_string(value, FIELD_LEVEL)
        .map_err(|source| SynthesisError::Serialize { field: key, source })?;
    Ok(RenderedField { key, value })
}

/// Permission list for the manifest, with host patterns when tabs is granted
fn permission_list(flags: &BTreeMap<Permission, bool>) -> Vec<&'static str> {
    let mut list: Vec<&'static str> = Permission::ALL
        .iter()
        .filter(|p| flags.get(*p).copied().unwrap_or(false))
        .map(|p| p.as_str())
        .collect();

    if flags.get(&Permission::Tabs).copied().unwrap_or(false) {
        list.push(ALL_HTTP);
        list.push(ALL_HTTPS);
    }

    list
}

/// Derive the manifest configuration from a set of answers
pub fn synthesize(answers: &AnswerSet) -> Result<ManifestConfig, SynthesisError> {
    if answers.name.trim().is_empty() {
        return Err(SynthesisError::EmptyName);
    }

    let has_options_page = answers.has_feature(UiFeature::OptionsPage);
    let has_omnibox = answers.has_feature(UiFeature::Omnibox);
    let has_content_script = answers.has_feature(UiFeature::ContentScript);

    let permission_flags: BTreeMap<Permission, bool> = Permission::ALL
        .iter()
        .map(|p| (*p, answers.permissions.contains(p)))
        .collect();

    // Serialized fields get the raw name; the JSON writer escapes it
    let mut rendered_fields = Vec::new();

    if let Some(key) = answers.action.manifest_key() {
        let action = ActionField {
            default_icon: ActionIcons {
                small: "images/icon-19.png",
                large: "images/icon-38.png",
            },
            default_title: &answers.name,
            default_popup: POPUP_PAGE,
        };
        rendered_fields.push(render(key, &action)?);
    }

    if has_options_page {
        rendered_fields.push(render("options_page", OPTIONS_PAGE)?);
    }

    if has_omnibox {
        rendered_fields.push(render("omnibox", &OmniboxField { keyword: &answers.name })?);
    }

    if has_content_script {
        let script = ContentScriptField {
            matches: [ALL_HTTP, ALL_HTTPS],
            css: ["styles/main.css"],
            js: ["scripts/contentscript.js"],
            run_at: "document_end",
            all_frames: false,
        };
        rendered_fields.push(render("content_scripts", &[script])?);
    }

    let permissions = permission_list(&permission_flags);
    if !permissions.is_empty() {
        rendered_fields.push(render("permissions", &permissions)?);
    }

    Ok(ManifestConfig {
        name: escape_quotes(&answers.name),
        description: escape_quotes(&answers.description),
        raw_name: answers.name.clone(),
        raw_description: answers.description.clone(),
        action: answers.action,
        has_options_page,
        has_omnibox,
        has_content_script,
        permission_flags,
        rendered_fields,
    })
}
