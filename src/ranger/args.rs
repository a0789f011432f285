//! Tool argument shapes
//!
//! The argument structs exist to declare each tool's parameter schema. Values
//! are only ever logged, so decoding never rejects a call.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// A loosely typed argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

/// Renders as compact JSON
impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Decode tool arguments, falling back to defaults instead of failing.
///
/// `null` is read as an empty object. Fields use [`lenient`], so a value of
/// the wrong type is dropped while the remaining fields are kept.
pub fn decode<T>(args: Value) -> T
where
    T: DeserializeOwned + Default,
{
    let args = match args {
        Value::Null => return T::default(),
        args @ Value::Object(_) => args,
        other => {
            debug!(arguments = %other, "ignoring non-object tool arguments");
            return T::default();
        }
    };

    serde_json::from_value(args).unwrap_or_else(|e| {
        debug!(error = %e, "ignoring undecodable tool arguments");
        T::default()
    })
}

/// Deserialize an optional field, mapping a mistyped value to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone())
        .map_err(|e| {
            debug!(value = %value, error = %e, "dropping mistyped tool argument");
        })
        .ok())
}

/// No parameters
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

/// Arguments for `ranger_with_input`
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct InputArgs {
    /// Input text from the user
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<String>")]
    pub input_text: Option<String>,
}

/// Arguments for `ranger_with_options`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OptionsArgs {
    /// Response option ('simple', 'json', 'extended')
    #[serde(default = "default_option_type", deserialize_with = "lenient")]
    #[schemars(with = "Option<String>")]
    pub option_type: Option<String>,
}

fn default_option_type() -> Option<String> {
    Some("simple".to_string())
}

impl Default for OptionsArgs {
    fn default() -> Self {
        Self {
            option_type: default_option_type(),
        }
    }
}

/// Arguments for `ranger_with_params`
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ParamsArgs {
    /// An arbitrary string parameter
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<String>")]
    pub param1: Option<String>,

    /// An arbitrary integer parameter
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<i64>")]
    pub param2: Option<i64>,

    /// An arbitrary object parameter
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<BTreeMap<String, ArgValue>>")]
    pub param3: Option<BTreeMap<String, ArgValue>>,
}

/// Arguments for `any_request`
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct AnyRequestArgs {
    /// The request string
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(with = "Option<String>")]
    pub request: Option<String>,

    /// Any other arbitrary parameters
    #[serde(flatten)]
    pub extra: BTreeMap<String, ArgValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arg_value_accepts_any_json() {
        let value: ArgValue = serde_json::from_value(json!({
            "s": "x",
            "n": 1,
            "f": 1.5,
            "b": true,
            "z": null,
            "l": [1, "two"],
            "m": {"nested": {}}
        }))
        .unwrap();

        let ArgValue::Map(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map["s"], ArgValue::String("x".into()));
        assert_eq!(map["n"], ArgValue::Integer(1));
        assert_eq!(map["f"], ArgValue::Float(1.5));
        assert_eq!(map["b"], ArgValue::Bool(true));
        assert_eq!(map["z"], ArgValue::Null);
        assert!(matches!(map["l"], ArgValue::List(_)));
        assert!(matches!(map["m"], ArgValue::Map(_)));
    }

    #[test]
    fn test_arg_value_display_is_json() {
        let value = ArgValue::Map(BTreeMap::from([("x".to_string(), ArgValue::Integer(1))]));
        assert_eq!(value.to_string(), r#"{"x":1}"#);
    }

    #[test]
    fn test_decode_null_and_missing() {
        let args: OptionsArgs = decode(Value::Null);
        assert_eq!(args.option_type.as_deref(), Some("simple"));

        let args: OptionsArgs = decode(json!({}));
        assert_eq!(args.option_type.as_deref(), Some("simple"));

        let args: OptionsArgs = decode(json!({"option_type": 3}));
        assert_eq!(args.option_type, None);
    }

    #[test]
    fn test_decode_drops_mistyped_field() {
        let args: ParamsArgs = decode(json!({
            "param1": "kept",
            "param2": "not a number"
        }));
        assert_eq!(args.param1.as_deref(), Some("kept"));
        assert_eq!(args.param2, None);
    }

    #[test]
    fn test_decode_non_object() {
        let args: InputArgs = decode(json!([1, 2, 3]));
        assert!(args.input_text.is_none());
    }

    #[test]
    fn test_any_request_collects_extras() {
        let args: AnyRequestArgs = decode(json!({
            "request": "hello",
            "extra": {"x": 1},
            "flag": false
        }));
        assert_eq!(args.request.as_deref(), Some("hello"));
        assert_eq!(args.extra.len(), 2);
        assert_eq!(args.extra["flag"], ArgValue::Bool(false));
    }
}
