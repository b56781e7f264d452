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

//! API to modify some fields of an existing user.

use crate::driver::Driver;
use crate::model::{EmailAddress, UserId, UserName};
use crate::rest::{RestError, patch_field, require_set};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

/// Message sent to the server to modify a user.  Fields are tri-state: an absent field is left
/// unchanged, a field set to a value is replaced, and a field explicitly set to null is
/// rejected because no field is nullable.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct UpdateUserRequest {
    /// New full name for the user, if requested.
    #[serde(default, deserialize_with = "patch_field", skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<Option<UserName>>,

    /// New contact email address for the user, if requested.
    #[serde(default, deserialize_with = "patch_field", skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<Option<EmailAddress>>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(user_id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, RestError> {
    let name = require_set(request.name, "name")?;
    let email = require_set(request.email, "email")?;
    let user = driver.update_user(user_id, name, email).await?;
    Ok(Json(user))
}
