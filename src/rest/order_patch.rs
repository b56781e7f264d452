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

//! API to modify some fields of an existing order.
//!
//! The owning user of an order cannot be changed through this API; replace the order instead.

use crate::driver::Driver;
use crate::model::{ItemName, OrderId, Quantity};
use crate::rest::{RestError, patch_field, require_set};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

/// Message sent to the server to modify an order.  Fields are tri-state: an absent field is
/// left unchanged, a field set to a value is replaced, and a field explicitly set to null is
/// rejected because no field is nullable.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct UpdateOrderRequest {
    /// New description for the purchased item, if requested.
    #[serde(default, deserialize_with = "patch_field", skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<Option<ItemName>>,

    /// New number of units of the item, if requested.
    #[serde(default, deserialize_with = "patch_field", skip_serializing_if = "Option::is_none")]
    pub(crate) quantity: Option<Option<Quantity>>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(order_id): Path<OrderId>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<impl IntoResponse, RestError> {
    let item = require_set(request.item, "item")?;
    let quantity = require_set(request.quantity, "quantity")?;
    let order = driver.update_order(order_id, item, quantity).await?;
    Ok(Json(order))
}
