//! Templates for generated extension projects
//!
//! The manifest is produced with `format!` so synthesized fields can be spliced
//! in verbatim; other JSON files are serialized from typed structs. Fixed stub
//! files and icons are embedded from the `templates/` directory.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::StylesheetFlavor;
use crate::models::ActionMode;

pub const POPUP_HTML: &str = include_str!("../../templates/popup.html");
pub const POPUP_JS: &str = include_str!("../../templates/scripts/popup.js");
pub const OPTIONS_HTML: &str = include_str!("../../templates/options.html");
pub const OPTIONS_JS: &str = include_str!("../../templates/scripts/options.js");
pub const CONTENTSCRIPT_JS: &str = include_str!("../../templates/scripts/contentscript.js");
pub const CHROMERELOAD_JS: &str = include_str!("../../templates/scripts/chromereload.js");

const BACKGROUND_JS: &str = include_str!("../../templates/scripts/background.js");
const BACKGROUND_BROWSER_ACTION_JS: &str =
    include_str!("../../templates/scripts/background.browseraction.js");
const BACKGROUND_PAGE_ACTION_JS: &str =
    include_str!("../../templates/scripts/background.pageaction.js");

const MAIN_CSS: &str = include_str!("../../templates/styles/main.css");
const MAIN_SCSS: &str = include_str!("../../templates/styles/main.scss");

const GRUNTFILE_JS: &str = include_str!("../../templates/Gruntfile.js");
const GRUNT_COMPASS_TASK: &str = include_str!("../../templates/compass.js");

/// Icons referenced by the manifest's `icons` field
pub const APP_ICONS: [(&str, &[u8]); 2] = [
    ("images/icon-16.png", include_bytes!("../../templates/images/icon-16.png")),
    ("images/icon-128.png", include_bytes!("../../templates/images/icon-128.png")),
];

/// Icons referenced by the action's `default_icon`
pub const ACTION_ICONS: [(&str, &[u8]); 2] = [
    ("images/icon-19.png", include_bytes!("../../templates/images/icon-19.png")),
    ("images/icon-38.png", include_bytes!("../../templates/images/icon-38.png")),
];

/// Background event page matching the action mode
pub fn background_js(action: ActionMode) -> &'static str {
    match action {
        ActionMode::None => BACKGROUND_JS,
        ActionMode::Browser => BACKGROUND_BROWSER_ACTION_JS,
        ActionMode::Page => BACKGROUND_PAGE_ACTION_JS,
    }
}

pub fn main_stylesheet(flavor: StylesheetFlavor) -> &'static str {
    match flavor {
        StylesheetFlavor::Css => MAIN_CSS,
        StylesheetFlavor::Scss => MAIN_SCSS,
    }
}

/// Generate app/manifest.json
///
/// `fragment` is spliced directly after the closing brace of `background`,
/// so it must be empty or start with `,\n`.
pub fn generate_manifest_json(fragment: &str) -> String {
    format!(
        r#"{{
  "name": "__MSG_appName__",
  "version": "0.0.1",
  "manifest_version": 2,
  "description": "__MSG_appDescription__",
  "icons": {{
    "16": "images/icon-16.png",
    "128": "images/icon-128.png"
  }},
  "default_locale": "en",
  "background": {{
    "scripts": [
      "scripts/chromereload.js",
      "scripts/background.js"
    ]
  }}{fragment}
}}
"#,
        fragment = fragment,
    )
}

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
    description: &'static str,
}

#[derive(Serialize)]
struct Messages<'a> {
    #[serde(rename = "appName")]
    app_name: Message<'a>,
    #[serde(rename = "appDescription")]
    app_description: Message<'a>,
}

/// Generate app/_locales/en/messages.json from the raw answer text
pub fn generate_messages_json(name: &str, description: &str) -> serde_json::Result<String> {
    let messages = Messages {
        app_name: Message {
            message: name,
            description: "The name of the application",
        },
        app_description: Message {
            message: description,
            description: "The description of the application",
        },
    };
    Ok(serde_json::to_string_pretty(&messages)? + "\n")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson<'a> {
    name: &'a str,
    version: &'static str,
    private: bool,
    dev_dependencies: BTreeMap<&'static str, &'static str>,
    engines: BTreeMap<&'static str, &'static str>,
}

/// Generate package.json with the grunt toolchain used by Gruntfile.js
pub fn generate_package_json(package_name: &str, flavor: StylesheetFlavor) -> serde_json::Result<String> {
    let mut dev_dependencies = BTreeMap::from([
        ("grunt", "^1.6.1"),
        ("grunt-contrib-clean", "^2.0.1"),
        ("grunt-contrib-compress", "^2.0.0"),
        ("grunt-contrib-copy", "^1.0.0"),
        ("grunt-contrib-jshint", "^3.2.0"),
        ("grunt-contrib-watch", "^1.1.0"),
        ("load-grunt-tasks", "^5.1.0"),
    ]);
    if flavor == StylesheetFlavor::Scss {
        dev_dependencies.insert("grunt-contrib-compass", "^1.1.1");
    }

    let package = PackageJson {
        name: package_name,
        version: "0.0.0",
        private: true,
        dev_dependencies,
        engines: BTreeMap::from([("node", ">=14.0.0")]),
    };
    Ok(serde_json::to_string_pretty(&package)? + "\n")
}

#[derive(Serialize)]
struct BowerJson<'a> {
    name: &'a str,
    version: &'static str,
    private: bool,
    dependencies: BTreeMap<&'static str, &'static str>,
}

/// Generate bower.json for front-end packages installed into app/bower_components
pub fn generate_bower_json(package_name: &str) -> serde_json::Result<String> {
    let bower = BowerJson {
        name: package_name,
        version: "0.0.0",
        private: true,
        dependencies: BTreeMap::new(),
    };
    Ok(serde_json::to_string_pretty(&bower)? + "\n")
}

/// Generate Gruntfile.js, adding the compass step for Sass stylesheets
pub fn generate_gruntfile(flavor: StylesheetFlavor) -> String {
    let (task, step) = match flavor {
        StylesheetFlavor::Css => ("\n", ""),
        StylesheetFlavor::Scss => (GRUNT_COMPASS_TASK, "'compass', "),
    };
    GRUNTFILE_JS
        .replace("/*STYLE_TASK*/\n", task)
        .replace("/*STYLE_STEP*/", step)
}
