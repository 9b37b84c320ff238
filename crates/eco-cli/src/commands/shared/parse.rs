use chrono::NaiveDate;
use eco_core::enums::Polarity;
use eco_core::submission::OptionInput;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a `YYYY-MM-DD` command-line date.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
}

/// Parse `--option Label` or `--option Label:polarity`.
///
/// Only a known polarity after the last colon is treated as a tag, so labels
/// such as `Ratio 1:2` stay intact.
pub fn parse_option(raw: &str) -> OptionInput {
    if let Some((label, tag)) = raw.rsplit_once(':')
        && let Ok(polarity) = parse_enum::<Polarity>(tag, "polarity")
    {
        return OptionInput::Tagged {
            label: label.trim().to_string(),
            polarity: Some(polarity),
        };
    }
    OptionInput::Label(raw.trim().to_string())
}

/// Parse `--field name=value`.
pub fn parse_field(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid field '{raw}': expected name=value"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("invalid field '{raw}': name is empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}
