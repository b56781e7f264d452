// ordersvc
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! API to query a description of the running service.

use crate::rest::{EmptyBody, RestError};
use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;

/// Description of the running service.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize, PartialEq))]
pub(crate) struct ServiceInfo {
    /// Free-form banner identifying the service.
    pub(crate) message: String,

    /// Version of the running binary.
    pub(crate) version: String,
}

/// API handler.
pub(crate) async fn handler(_: EmptyBody) -> Result<impl IntoResponse, RestError> {
    Ok(Json(ServiceInfo {
        message: "ordersvc is running".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    }))
}
