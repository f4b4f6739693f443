use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for signup. Absent, `null`, `false`, `0` and `""` all count
/// as missing.
#[derive(Deserialize, Default)]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub password: Option<String>,
}

/// Reads a credential field. Falsy JSON values map to `None`; any other
/// non-string value is a malformed body.
fn falsy_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Returns the value when it is present and non-empty.
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}
