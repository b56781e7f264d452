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

//! Test utilities for the business layer.

use crate::db::Db;
use crate::db::memory::MemoryDb;
use crate::driver::Driver;
use crate::model::{
    EmailAddress, ItemName, Order, OrderId, Pagination, Quantity, User, UserId, UserName,
};
use std::sync::Arc;

/// State of a running test, including a driver and direct access to its backing store.
pub(crate) struct TestContext {
    /// The store that the driver under test writes to.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against an empty in-memory store.
    pub(crate) fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(MemoryDb::default());
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Returns a clone of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Inserts a user named `name` directly into the store, deriving an email address from the
    /// name, and returns the stored record.
    pub(crate) async fn create_user(&self, name: &str) -> User {
        let name = UserName::new(name).unwrap();
        let local = name.as_str().to_lowercase().replace(' ', ".");
        let email = EmailAddress::new(format!("{}@example.com", local)).unwrap();
        self.db.insert_user(name, email).await.unwrap()
    }

    /// Inserts an order directly into the store and returns the stored record.
    pub(crate) async fn create_order(&self, user_id: UserId, item: &str, quantity: u32) -> Order {
        let item = ItemName::new(item).unwrap();
        let quantity = Quantity::new(quantity).unwrap();
        self.db.insert_order(user_id, item, quantity).await.unwrap()
    }

    /// Gets the user with the hardcoded identifier `id` straight from the store.
    pub(crate) async fn get_user(&self, id: i64) -> User {
        self.db.get_user(UserId::from(id)).await.unwrap()
    }

    /// Checks whether the user with the hardcoded identifier `id` exists in the store.
    pub(crate) async fn has_user(&self, id: i64) -> bool {
        self.db.get_user(UserId::from(id)).await.is_ok()
    }

    /// Gets the order with the hardcoded identifier `id` straight from the store.
    pub(crate) async fn get_order(&self, id: i64) -> Order {
        self.db.get_order(OrderId::from(id)).await.unwrap()
    }

    /// Checks whether the order with the hardcoded identifier `id` exists in the store.
    pub(crate) async fn has_order(&self, id: i64) -> bool {
        self.db.get_order(OrderId::from(id)).await.is_ok()
    }

    /// Counts all orders currently in the store.
    pub(crate) async fn count_orders(&self) -> usize {
        let pagination = Pagination::new(None, Some(100)).unwrap();
        self.db.list_orders(pagination).await.unwrap().len()
    }
}
