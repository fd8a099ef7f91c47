//! Standard response envelope helpers.

use axum::{
    http::{header, StatusCode},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

/// 201 with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(
    location: String,
    data: T,
) -> (StatusCode, [(header::HeaderName, String); 1], Json<SuccessOne<T>>) {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SuccessOne { data }),
    )
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data }))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}
