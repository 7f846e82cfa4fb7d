//! Typed stores over the raw feed.
//!
//! One store per collection, in the repository style: each wraps a shared
//! feed handle and owns the encode/decode boundary so the rest of the
//! system works with domain types, never raw JSON.

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderStore;
pub use products::ProductStore;
pub use users::UserStore;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a keyed collection snapshot, newest insertion first.
///
/// Feed iteration order is insertion order (push keys sort
/// chronologically), so entries are sorted by key ascending and then
/// reversed. Absence of data yields an empty list, never an error;
/// individual records that fail to decode are skipped with a warning so
/// one malformed write cannot blank the whole mirror.
pub(crate) fn decode_newest_first<K, T>(snapshot: Option<&Value>) -> Vec<(K, T)>
where
    K: From<String>,
    T: DeserializeOwned,
{
    let Some(Value::Object(entries)) = snapshot else {
        return Vec::new();
    };

    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();

    let mut decoded = Vec::with_capacity(keys.len());
    for key in keys.into_iter().rev() {
        let Some(value) = entries.get(key) else {
            continue;
        };
        match serde_json::from_value::<T>(value.clone()) {
            Ok(record) => decoded.push((K::from(key.clone()), record)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "skipping undecodable feed record");
            }
        }
    }
    decoded
}
