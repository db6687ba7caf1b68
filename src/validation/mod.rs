//! Schema validation for generated manifests

use anyhow::{bail, Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;

const MANIFEST_SCHEMA: &str = include_str!("../../schemas/manifest.json");

/// Parse a rendered manifest and validate it against the manifest schema
pub fn validate_manifest(text: &str) -> Result<Value> {
    let manifest: Value =
        serde_json::from_str(text).context("Rendered manifest is not valid JSON")?;

    validate_against_schema(&manifest)?;

    Ok(manifest)
}

fn validate_against_schema(manifest: &Value) -> Result<()> {
    let schema_json: Value =
        serde_json::from_str(MANIFEST_SCHEMA).context("Failed to parse manifest schema")?;

    let compiled = JSONSchema::compile(&schema_json)
        .map_err(|e| anyhow::anyhow!("Failed to compile JSON schema: {}", e))?;

    if let Err(errors) = compiled.validate(manifest) {
        let error_messages: Vec<String> = errors.map(|e| format!("{}", e)).collect();
        bail!("Manifest validation failed:\n{}", error_messages.join("\n"));
    }

    Ok(())
}
