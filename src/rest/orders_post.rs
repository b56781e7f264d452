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

//! API to create a new order.

use crate::driver::Driver;
use crate::model::{ItemName, Quantity, UserId};
use crate::rest::RestError;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use serde::{Deserialize, Serialize};

/// Message sent to the server to create an order.  Also used to replace an existing one, as a
/// replacement must supply every field anew.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateOrderRequest {
    /// Identifier of the user placing the order, which must exist.
    pub(crate) user_id: UserId,

    /// Description of the purchased item.
    pub(crate) item: ItemName,

    /// Number of units of the item.
    pub(crate) quantity: Quantity,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let order = driver.create_order(request.user_id, request.item, request.quantity).await?;
    Ok((http::StatusCode::CREATED, Json(order)))
}
