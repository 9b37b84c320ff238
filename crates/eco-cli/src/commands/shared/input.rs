use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and deserialize a JSON input file. `-` reads stdin.
pub fn read_json_file<T>(path: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let contents = if path == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read {path}"))?
    };
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {path}"))
}
