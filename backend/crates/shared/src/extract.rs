//! Request body extractors
//!
//! axum 標準の `Json` / `Form` は拒否時にプレーンテキストを返すため、
//! ここでは拒否を [`AppError`] (RFC 7807) に揃えた抽出器を提供します。

use axum::body::Bytes;
use axum::extract::{Form, FromRequest, Request};
use axum::http::header;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// `application/json` と `application/x-www-form-urlencoded` の両方を受け付ける抽出器
///
/// それ以外の Content-Type は 400 で拒否します。
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

/// `application/json` のみを受け付ける抽出器
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
}

fn body_format(req: &Request) -> Option<BodyFormat> {
    let content_type = req.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        Some(BodyFormat::Json)
    } else if essence == "application/x-www-form-urlencoded" {
        Some(BodyFormat::Form)
    } else {
        None
    }
}

async fn read_json<T, S>(req: Request, state: &S) -> Result<T, AppError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_format(&req) {
            Some(BodyFormat::Json) => read_json(req, state).await.map(Self),
            Some(BodyFormat::Form) => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|_| AppError::bad_request("Malformed form body"))?;
                Ok(Self(value))
            }
            None => Err(unsupported_content_type()),
        }
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_format(&req) {
            Some(BodyFormat::Json) => read_json(req, state).await.map(Self),
            _ => Err(unsupported_content_type()),
        }
    }
}

fn unsupported_content_type() -> AppError {
    AppError::bad_request("Unsupported content type")
        .with_action("Send the body as application/json")
}
