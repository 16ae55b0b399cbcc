//! Cache record stored on disk by [`ConfigManager::save_cache`](crate::ConfigManager::save_cache)

use crate::config::{ConfigMap, Groups};
use crate::error::{Error, Result};
use crate::parsers::value_kind;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Cache never expires
pub const EXPIRE_NEVER: u64 = 0;
/// Cache expires after one day
pub const EXPIRE_ONE_DAY: u64 = 86_400;
/// Cache expires after one week
pub const EXPIRE_ONE_WEEK: u64 = 604_800;
/// Cache expires after thirty days
pub const EXPIRE_ONE_MONTH: u64 = 2_592_000;

const FIELDS: [&str; 3] = ["config", "groups", "expires"];

/// Full store snapshot: values, groups and an absolute expiry
///
/// `expires` is a Unix timestamp, or 0 for a cache that never expires.
/// `false` is accepted on read as a synonym for 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub config: ConfigMap,
    pub groups: Groups,
    #[serde(deserialize_with = "timestamp_or_false")]
    pub expires: i64,
}

fn timestamp_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        At(i64),
        Flag(bool),
    }

    match Raw::deserialize(deserializer)? {
        Raw::At(ts) => Ok(ts),
        Raw::Flag(false) => Ok(0),
        Raw::Flag(true) => Err(D::Error::custom("expires must be a timestamp or false")),
    }
}

impl CacheRecord {
    /// Validate and convert a decoded cache document
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if a field is missing, `config` or
    /// `groups` is not a mapping, a group is not a mapping of strings, or
    /// `expires` is neither an integer nor `false`.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = &value else {
            return Err(Error::InvalidFormat(format!(
                "cache must be a mapping, found {}",
                value_kind(&value)
            )));
        };

        if let Some(missing) = FIELDS.iter().find(|f| !root.contains_key(**f)) {
            return Err(Error::InvalidFormat(format!(
                "cache is missing the '{missing}' field"
            )));
        }

        if !root["config"].is_object() {
            return Err(Error::InvalidFormat(format!(
                "cache 'config' must be a mapping, found {}",
                value_kind(&root["config"])
            )));
        }

        let Value::Object(groups) = &root["groups"] else {
            return Err(Error::InvalidFormat(format!(
                "cache 'groups' must be a mapping, found {}",
                value_kind(&root["groups"])
            )));
        };
        for (name, members) in groups {
            let valid = members
                .as_object()
                .is_some_and(|m| m.values().all(Value::is_string));
            if !valid {
                return Err(Error::InvalidFormat(format!(
                    "cache group '{name}' must map keys to sub-keys"
                )));
            }
        }

        match &root["expires"] {
            Value::Bool(false) => {}
            Value::Number(n) if n.is_i64() => {}
            other => {
                return Err(Error::InvalidFormat(format!(
                    "cache 'expires' must be a timestamp or false, found {}",
                    value_kind(other)
                )));
            }
        }

        serde_json::from_value(value).map_err(|e| Error::InvalidFormat(e.to_string()))
    }

    /// Whether the record has a deadline that lies before `now`
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires != 0 && now > self.expires
    }
}

/// Current Unix timestamp in seconds
pub(crate) fn now_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Absolute expiry for a cache written at `now` that lives `expires_in` seconds
pub(crate) fn expiry_timestamp(now: i64, expires_in: u64) -> i64 {
    if expires_in == EXPIRE_NEVER {
        return 0;
    }
    now.saturating_add(i64::try_from(expires_in).unwrap_or(i64::MAX))
}

/// Human-readable expiry for log messages
pub(crate) fn describe_expiry(expires: i64) -> String {
    if expires == 0 {
        return "never".to_string();
    }
    OffsetDateTime::from_unix_timestamp(expires)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| expires.to_string())
}
