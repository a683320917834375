//! Data models for HTTP requests and responses.
//!
//! These are the values exchanged between the request executor, the
//! persistence store, and whatever presentation layer drives them. Their
//! serde shapes double as the on-disk format of `templates.json` and
//! `history.json`.

pub mod request;
pub mod response;

pub use request::{HeaderEntry, RequestSpec, DEFAULT_METHOD, SUPPORTED_METHODS};
pub use response::ResponseResult;

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default value.
///
/// Files written by older builds store empty header collections as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
