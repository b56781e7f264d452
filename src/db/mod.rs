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

//! Database abstraction in terms of the operations needed by the server.
//!
//! The service keeps two independent collections, users and orders, both keyed by their integer
//! identifier.  Identifiers are assigned by the database at insertion time and grow monotonically
//! for the lifetime of the process, so listing a collection returns records in insertion order.

use crate::model::{
    EmailAddress, ItemName, ModelError, Order, OrderId, Pagination, Quantity, User, UserId,
    UserName,
};
use async_trait::async_trait;

pub(crate) mod memory;

/// Database errors.  Any unexpected errors that come from the storage layer are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub(crate) type DbResult<T> = Result<T, DbError>;

/// Abstraction over the two collections persisted by the service.
#[async_trait]
pub(crate) trait Db {
    /// Inserts a new user with the given fields, assigning it a fresh identifier.  Returns the
    /// stored record.
    async fn insert_user(&self, name: UserName, email: EmailAddress) -> DbResult<User>;

    /// Gets the user with the given `id`.
    async fn get_user(&self, id: UserId) -> DbResult<User>;

    /// Lists the slice of users selected by `pagination`, in insertion order.
    async fn list_users(&self, pagination: Pagination) -> DbResult<Vec<User>>;

    /// Replaces the stored user that has `user`'s identifier.  Fails if no such user exists.
    async fn put_user(&self, user: User) -> DbResult<()>;

    /// Deletes the user with the given `id`.  Orders referencing the user are left untouched.
    async fn delete_user(&self, id: UserId) -> DbResult<()>;

    /// Inserts a new order with the given fields, assigning it a fresh identifier.  Returns the
    /// stored record.  The caller is responsible for validating that `user_id` exists.
    async fn insert_order(
        &self,
        user_id: UserId,
        item: ItemName,
        quantity: Quantity,
    ) -> DbResult<Order>;

    /// Gets the order with the given `id`.
    async fn get_order(&self, id: OrderId) -> DbResult<Order>;

    /// Lists the slice of orders selected by `pagination`, in insertion order.
    async fn list_orders(&self, pagination: Pagination) -> DbResult<Vec<Order>>;

    /// Lists all orders placed by `user_id`, in insertion order.
    async fn list_orders_by_user(&self, user_id: UserId) -> DbResult<Vec<Order>>;

    /// Replaces the stored order that has `order`'s identifier.  Fails if no such order exists.
    async fn put_order(&self, order: Order) -> DbResult<()>;

    /// Deletes the order with the given `id`.
    async fn delete_order(&self, id: OrderId) -> DbResult<()>;
}
