//! Request extractors whose rejections render as [`AppError`], plus the
//! serde helpers used by partial-update bodies.

use axum::extract::{FromRequest, FromRequestParts};
use serde::{
    de::{self, DeserializeOwned, IntoDeserializer},
    Deserialize, Deserializer,
};
use time::OffsetDateTime;

use crate::error::{AppError, AppResult};

/// `axum::Json` with 422 field-level rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with 422 rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` with 422 rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// For patch fields that may be cleared: absent → `None`,
/// `null` → `Some(None)`, value → `Some(Some(v))`.
/// Use together with `#[serde(default)]`.
pub fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// For patch fields that may be omitted but never set to `null`.
/// Use together with `#[serde(default)]`.
pub fn present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(de).map(Some)
}

/// [`nullable`] for RFC 3339 timestamps.
pub fn nullable_rfc3339<'de, D>(de: D) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(de).map(Some)
}

/// [`present`] for RFC 3339 timestamps.
pub fn present_rfc3339<'de, D>(de: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::deserialize(de).map(Some)
}

/// For query filters: an empty value (`?status=`) is the same as an absent one.
/// Use together with `#[serde(default)]`.
pub fn blank_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<String>::deserialize(de)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(raw.trim().to_string().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

/// Query-string boolean accepting `true/false`, `1/0`, `yes/no` and `on/off`.
/// An empty value is `false`.
pub fn flag<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Str(&raw),
            &"a boolean",
        )),
    }
}

/// Required text must contain something besides whitespace.
pub fn require_non_blank(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(field, "must not be blank"));
    }
    Ok(())
}
