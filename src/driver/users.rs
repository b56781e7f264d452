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

//! Operations on the users collection.

use crate::driver::{Driver, DriverResult};
use crate::model::{EmailAddress, Pagination, User, UserId, UserName};
use log::info;

impl Driver {
    /// Creates a new user with the given fields and returns the stored record.
    pub(crate) async fn create_user(
        self,
        name: UserName,
        email: EmailAddress,
    ) -> DriverResult<User> {
        let user = self.db.insert_user(name, email).await?;
        info!("Created user {}", user.id());
        Ok(user)
    }

    /// Gets the user with the given `id`.
    pub(crate) async fn get_user(self, id: UserId) -> DriverResult<User> {
        let user = self.db.get_user(id).await?;
        Ok(user)
    }

    /// Lists the slice of users selected by `pagination`.
    pub(crate) async fn list_users(self, pagination: Pagination) -> DriverResult<Vec<User>> {
        let users = self.db.list_users(pagination).await?;
        Ok(users)
    }

    /// Replaces all fields of the user `id` and returns the updated record.  The identifier
    /// itself is immutable.
    pub(crate) async fn replace_user(
        self,
        id: UserId,
        name: UserName,
        email: EmailAddress,
    ) -> DriverResult<User> {
        let user = User::new(id, name, email);
        self.db.put_user(user.clone()).await?;
        Ok(user)
    }

    /// Merges the supplied fields into the user `id` and returns the updated record.  Fields
    /// that are `None` are left unchanged.
    pub(crate) async fn update_user(
        self,
        id: UserId,
        name: Option<UserName>,
        email: Option<EmailAddress>,
    ) -> DriverResult<User> {
        let old = self.db.get_user(id).await?;
        let user = User::new(
            id,
            name.unwrap_or_else(|| old.name().clone()),
            email.unwrap_or_else(|| old.email().clone()),
        );
        self.db.put_user(user.clone()).await?;
        Ok(user)
    }

    /// Deletes the user `id`.  Orders placed by the user are left untouched.
    pub(crate) async fn delete_user(self, id: UserId) -> DriverResult<()> {
        self.db.delete_user(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
