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

//! In-memory implementation of the database abstraction.
//!
//! All data lives in process memory and vanishes on restart.  A single mutex guards both
//! collections; no operation awaits while holding it, so handlers cannot observe a partially
//! applied mutation.

use crate::db::{Db, DbError, DbResult};
use crate::model::{
    EmailAddress, ItemName, Order, OrderId, Pagination, Quantity, User, UserId, UserName,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Generator of identifiers for one collection.
///
/// Hands out strictly increasing integers starting at 1.  Deleting the record with the highest
/// identifier does not make that identifier available again: the sequence only remembers the
/// last value it produced, not the collection's contents.
#[derive(Default)]
struct IdSequence {
    /// Last identifier handed out, or zero if none was produced yet.
    last: i64,
}

impl IdSequence {
    /// Returns the next identifier in the sequence.
    fn next(&mut self) -> i64 {
        self.last += 1;
        self.last
    }
}

/// Contents of the whole data set.
///
/// Because identifiers grow monotonically, the key order of these maps matches insertion order,
/// which is what listings rely on to produce stable pagination windows.
#[derive(Default)]
struct State {
    /// All known users, keyed by identifier.
    users: BTreeMap<UserId, User>,

    /// Identifier sequence for the users collection.
    user_ids: IdSequence,

    /// All known orders, keyed by identifier.
    orders: BTreeMap<OrderId, Order>,

    /// Identifier sequence for the orders collection.
    order_ids: IdSequence,
}

/// A database implementation that keeps all data in memory.
#[derive(Default)]
pub(crate) struct MemoryDb {
    /// Both collections and their identifier sequences, under one lock.
    state: Mutex<State>,
}

impl MemoryDb {
    /// Acquires the data lock, converting a poisoned mutex into a database error.
    fn lock(&self) -> DbResult<MutexGuard<'_, State>> {
        self.state.lock().map_err(|e| DbError::BackendError(format!("Mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl Db for MemoryDb {
    async fn insert_user(&self, name: UserName, email: EmailAddress) -> DbResult<User> {
        let mut state = self.lock()?;
        let id = UserId::new(state.user_ids.next())?;
        let user = User::new(id, name, email);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> DbResult<User> {
        let state = self.lock()?;
        state.users.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn list_users(&self, pagination: Pagination) -> DbResult<Vec<User>> {
        let state = self.lock()?;
        Ok(state
            .users
            .values()
            .skip(pagination.offset())
            .take(pagination.limit())
            .cloned()
            .collect())
    }

    async fn put_user(&self, user: User) -> DbResult<()> {
        let mut state = self.lock()?;
        if !state.users.contains_key(user.id()) {
            return Err(DbError::NotFound);
        }
        let id = *user.id();
        state.users.insert(id, user);
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> DbResult<()> {
        let mut state = self.lock()?;
        state.users.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }

    async fn insert_order(
        &self,
        user_id: UserId,
        item: ItemName,
        quantity: Quantity,
    ) -> DbResult<Order> {
        let mut state = self.lock()?;
        let id = OrderId::new(state.order_ids.next())?;
        let order = Order::new(id, user_id, item, quantity);
        state.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> DbResult<Order> {
        let state = self.lock()?;
        state.orders.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn list_orders(&self, pagination: Pagination) -> DbResult<Vec<Order>> {
        let state = self.lock()?;
        Ok(state
            .orders
            .values()
            .skip(pagination.offset())
            .take(pagination.limit())
            .cloned()
            .collect())
    }

    async fn list_orders_by_user(&self, user_id: UserId) -> DbResult<Vec<Order>> {
        let state = self.lock()?;
        Ok(state.orders.values().filter(|order| *order.user_id() == user_id).cloned().collect())
    }

    async fn put_order(&self, order: Order) -> DbResult<()> {
        let mut state = self.lock()?;
        if !state.orders.contains_key(order.id()) {
            return Err(DbError::NotFound);
        }
        let id = *order.id();
        state.orders.insert(id, order);
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> DbResult<()> {
        let mut state = self.lock()?;
        state.orders.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }
}
