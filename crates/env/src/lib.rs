use std::path::PathBuf;

use serde::{
    de::{value::MapDeserializer, Error},
    Deserialize, Deserializer,
};
use serde_json::Value;

pub trait EnvVars {
    const PREFIX: &'static str;
}

/// Overrides for the bridge configuration read from the process environment.
///
/// Every field is optional so that an unset variable leaves the configured value alone.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct BridgeVars {
    /// Name or path of the native library to bind.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub library: Option<String>,

    pub debug: Option<bool>,

    pub debug_ext: Option<bool>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub log_file: Option<PathBuf>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub config_file: Option<PathBuf>,
}

/// Reads a string field, keeping the text of values that happen to parse as JSON numbers or
/// booleans, e.g. `FGBRIDGE_LIBRARY=2077`.
fn scalar_as_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(T::from(value))),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(T::from(value.to_string()))),
        Some(other) => Err(D::Error::custom(format!("expected a string, found {other}"))),
    }
}

impl EnvVars for BridgeVars {
    const PREFIX: &'static str = "FGBRIDGE_";
}

pub fn deserialize_from_env<'de, T: Deserialize<'de> + EnvVars>() -> Result<T, serde_json::Error> {
    deserialize_prefixed(std::env::vars())
}

/// Deserializes the variables in `input` that carry `T`'s prefix.
pub fn deserialize_prefixed<'de, T: Deserialize<'de> + EnvVars>(
    input: impl IntoIterator<Item = (String, String)>,
) -> Result<T, serde_json::Error> {
    deserialize(
        input
            .into_iter()
            .filter(|(k, _)| k.starts_with(T::PREFIX))
            .map(|(k, v)| (k.trim_start_matches(T::PREFIX).to_ascii_lowercase(), v)),
    )
}

/// Values are parsed as JSON, falling back to a plain string for values like `dlss-enabler.dll`.
pub fn deserialize<'de, T: Deserialize<'de>>(
    input: impl IntoIterator<Item = (String, String)>,
) -> Result<T, serde_json::Error> {
    T::deserialize(MapDeserializer::new(input.into_iter().map(|(k, v)| {
        let value = serde_json::from_str::<Value>(v.as_str()).unwrap_or(Value::String(v));
        (k, value)
    })))
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{deserialize_prefixed, BridgeVars};

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_only_prefixed_vars() {
        let parsed: BridgeVars = deserialize_prefixed(vars(&[
            ("FGBRIDGE_DEBUG", "true"),
            ("FGBRIDGE_LIBRARY", "custom-enabler.dll"),
            ("DEBUG", "false"),
            ("PATH", "/usr/bin"),
        ]))
        .unwrap();

        assert_eq!(
            BridgeVars {
                library: Some("custom-enabler.dll".into()),
                debug: Some(true),
                ..Default::default()
            },
            parsed
        );
    }

    #[test]
    fn json_encoded_strings_are_accepted() {
        let parsed: BridgeVars =
            deserialize_prefixed(vars(&[("FGBRIDGE_LOG_FILE", r#""C:/logs/bridge.log""#)])).unwrap();

        assert_eq!(Some(PathBuf::from("C:/logs/bridge.log")), parsed.log_file);
    }

    #[test]
    fn rejects_mistyped_values() {
        let parsed = deserialize_prefixed::<BridgeVars>(vars(&[("FGBRIDGE_DEBUG", "sometimes")]));

        assert!(parsed.is_err());
    }

    #[test]
    fn scalar_values_are_kept_as_text() {
        let parsed: BridgeVars = deserialize_prefixed(vars(&[
            ("FGBRIDGE_LIBRARY", "2077"),
            ("FGBRIDGE_LOG_FILE", "true"),
        ]))
        .unwrap();

        assert_eq!(Some("2077".to_string()), parsed.library);
        assert_eq!(Some(PathBuf::from("true")), parsed.log_file);
    }

    #[test]
    fn structured_values_are_not_library_names() {
        let parsed = deserialize_prefixed::<BridgeVars>(vars(&[("FGBRIDGE_LIBRARY", "[1, 2]")]));

        assert!(parsed.is_err());
    }
}
