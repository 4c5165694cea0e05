use axum::extract::{FromRequest, FromRequestParts, Path};
use chrono::{SecondsFormat, Utc};

use crate::error::AppError;

/// JSON body whose rejections come back as 400 `{message}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Payload<T>(pub T);

/// Path parameters whose rejections come back as 400 `{message}`.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct Id<T>(pub T);

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drops repeats from an already sorted list.
pub fn dedup_sorted(mut values: Vec<String>) -> Vec<String> {
    values.dedup();
    values
}
