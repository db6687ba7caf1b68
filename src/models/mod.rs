//! Answer models for crxgen
//!
//! An `AnswerSet` is collected once (CLI flags, answers file, config defaults)
//! and never mutated afterwards. Sets are ordered by declaration order so the
//! order in which members are supplied never leaks into generated output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Toolbar action included in the extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionMode {
    #[default]
    None,
    Browser,
    Page,
}

impl ActionMode {
    /// Manifest key for the action field, if any
    pub fn manifest_key(&self) -> Option<&'static str> {
        match self {
            ActionMode::None => None,
            ActionMode::Browser => Some("browser_action"),
            ActionMode::Page => Some("page_action"),
        }
    }
}

impl std::fmt::Display for ActionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionMode::None => write!(f, "none"),
            ActionMode::Browser => write!(f, "browser"),
            ActionMode::Page => write!(f, "page"),
        }
    }
}

impl std::str::FromStr for ActionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "no" => Ok(ActionMode::None),
            "browser" => Ok(ActionMode::Browser),
            "page" => Ok(ActionMode::Page),
            _ => Err(format!("Invalid action: {}. Use: none, browser, page", s)),
        }
    }
}

/// Optional UI features
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UiFeature {
    #[serde(rename = "options")]
    OptionsPage,
    ContentScript,
    Omnibox,
}

impl std::fmt::Display for UiFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiFeature::OptionsPage => write!(f, "options"),
            UiFeature::ContentScript => write!(f, "contentscript"),
            UiFeature::Omnibox => write!(f, "omnibox"),
        }
    }
}

impl std::str::FromStr for UiFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "options" => Ok(UiFeature::OptionsPage),
            "contentscript" => Ok(UiFeature::ContentScript),
            "omnibox" => Ok(UiFeature::Omnibox),
            _ => Err(format!(
                "Invalid UI feature: {}. Use: options, contentscript, omnibox",
                s
            )),
        }
    }
}

/// Extension permissions, in manifest emission order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Tabs,
    Bookmarks,
    Cookies,
    History,
    Management,
}

impl Permission {
    pub const ALL: [Permission; 5] = [
        Permission::Tabs,
        Permission::Bookmarks,
        Permission::Cookies,
        Permission::History,
        Permission::Management,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Tabs => "tabs",
            Permission::Bookmarks => "bookmarks",
            Permission::Cookies => "cookies",
            Permission::History => "history",
            Permission::Management => "management",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tabs" => Ok(Permission::Tabs),
            "bookmarks" | "bookmark" => Ok(Permission::Bookmarks),
            "cookies" | "cookie" => Ok(Permission::Cookies),
            "history" => Ok(Permission::History),
            "management" => Ok(Permission::Management),
            _ => Err(format!(
                "Invalid permission: {}. Use: tabs, bookmarks, cookies, history, management",
                s
            )),
        }
    }
}

/// Answers describing the extension to generate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: ActionMode,
    #[serde(default)]
    pub ui_features: BTreeSet<UiFeature>,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl AnswerSet {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            action: ActionMode::None,
            ui_features: BTreeSet::new(),
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_action(mut self, action: ActionMode) -> Self {
        self.action = action;
        self
    }

    pub fn with_ui_features<I: IntoIterator<Item = UiFeature>>(mut self, features: I) -> Self {
        self.ui_features.extend(features);
        self
    }

    pub fn with_permissions<I: IntoIterator<Item = Permission>>(mut self, permissions: I) -> Self {
        self.permissions.extend(permissions);
        self
    }

    pub fn has_feature(&self, feature: UiFeature) -> bool {
        self.ui_features.contains(&feature)
    }
}
