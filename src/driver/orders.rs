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

//! Operations on the orders collection.
//!
//! Orders reference users, and the reference is validated when an order is created or replaced.
//! The reference is not re-validated afterwards: deleting a user leaves its orders behind with a
//! dangling user identifier.

use crate::db::DbError;
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{ItemName, Order, OrderId, Pagination, Quantity, UserId};
use log::info;

impl Driver {
    /// Ensures that the user `user_id` exists, failing with a caller-visible error otherwise.
    async fn check_user_exists(&self, user_id: UserId) -> DriverResult<()> {
        match self.db.get_user(user_id).await {
            Ok(_) => Ok(()),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound(format!("User {} not found", user_id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates a new order with the given fields and returns the stored record.  Fails if
    /// `user_id` does not reference an existing user.
    pub(crate) async fn create_order(
        self,
        user_id: UserId,
        item: ItemName,
        quantity: Quantity,
    ) -> DriverResult<Order> {
        self.check_user_exists(user_id).await?;
        let order = self.db.insert_order(user_id, item, quantity).await?;
        info!("Created order {} for user {}", order.id(), user_id);
        Ok(order)
    }

    /// Gets the order with the given `id`.
    pub(crate) async fn get_order(self, id: OrderId) -> DriverResult<Order> {
        let order = self.db.get_order(id).await?;
        Ok(order)
    }

    /// Lists the slice of orders selected by `pagination`.
    pub(crate) async fn list_orders(self, pagination: Pagination) -> DriverResult<Vec<Order>> {
        let orders = self.db.list_orders(pagination).await?;
        Ok(orders)
    }

    /// Lists all orders placed by the user `user_id`.  Fails if the user does not exist.
    pub(crate) async fn list_orders_for_user(self, user_id: UserId) -> DriverResult<Vec<Order>> {
        self.check_user_exists(user_id).await?;
        let orders = self.db.list_orders_by_user(user_id).await?;
        Ok(orders)
    }

    /// Replaces all fields of the order `id` and returns the updated record.  The identifier
    /// itself is immutable, and the new `user_id` must reference an existing user.
    pub(crate) async fn replace_order(
        self,
        id: OrderId,
        user_id: UserId,
        item: ItemName,
        quantity: Quantity,
    ) -> DriverResult<Order> {
        let _existing = self.db.get_order(id).await?;
        self.check_user_exists(user_id).await?;
        let order = Order::new(id, user_id, item, quantity);
        self.db.put_order(order.clone()).await?;
        Ok(order)
    }

    /// Merges the supplied fields into the order `id` and returns the updated record.  Fields
    /// that are `None` are left unchanged.  The owning user cannot be changed this way.
    pub(crate) async fn update_order(
        self,
        id: OrderId,
        item: Option<ItemName>,
        quantity: Option<Quantity>,
    ) -> DriverResult<Order> {
        let old = self.db.get_order(id).await?;
        let order = Order::new(
            id,
            *old.user_id(),
            item.unwrap_or_else(|| old.item().clone()),
            quantity.unwrap_or(*old.quantity()),
        );
        self.db.put_order(order.clone()).await?;
        Ok(order)
    }

    /// Deletes the order `id`.
    pub(crate) async fn delete_order(self, id: OrderId) -> DriverResult<()> {
        self.db.delete_order(id).await?;
        info!("Deleted order {}", id);
        Ok(())
    }
}
