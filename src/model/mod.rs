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

//! High-level data types.
//!
//! All scalar values that cross the REST boundary are newtypes that validate their content at
//! construction time.  Their `Deserialize` implementations funnel through the validating
//! constructors so that a request carrying a bad field never makes it past body decoding.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::fmt;

mod email;
pub(crate) use email::EmailAddress;

/// Model errors.  These indicate malformed or out-of-range values in the domain types.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct ModelError(pub(crate) String);

/// Result type for this module.
pub(crate) type ModelResult<T> = Result<T, ModelError>;

/// Generates an integer identifier newtype with positivity validation.
macro_rules! id_type [
    ( $name:ident, $what:expr ) => {
        /// Identifier of a record in one collection.  Identifiers are assigned by the server,
        /// start at 1, and are never recycled.
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[cfg_attr(test, derive(Debug))]
        #[serde(transparent)]
        pub(crate) struct $name(i64);

        impl $name {
            /// Creates a new identifier from `id`, making sure it is in range.
            pub(crate) fn new(id: i64) -> ModelResult<Self> {
                if id < 1 {
                    return Err(ModelError(format!(
                        "{} identifier must be positive, got {}", $what, id
                    )));
                }
                Ok(Self(id))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let id = i64::deserialize(deserializer)?;
                Self::new(id).map_err(serde::de::Error::custom)
            }
        }

        #[cfg(test)]
        impl From<i64> for $name {
            /// Creates a new identifier from a hardcoded integer, which must be valid.
            fn from(id: i64) -> Self {
                Self::new(id).expect("Hardcoded identifiers for testing must be valid")
            }
        }
    }
];

id_type!(UserId, "User");
id_type!(OrderId, "Order");

/// Minimum length of a user's name.
pub(crate) const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of a user's name.
pub(crate) const MAX_NAME_LENGTH: usize = 50;

/// Represents the full name of a user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct UserName(String);

impl UserName {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.len() < MIN_NAME_LENGTH {
            return Err(ModelError(format!(
                "Name must have at least {} characters",
                MIN_NAME_LENGTH
            )));
        }
        if s.len() > MAX_NAME_LENGTH {
            return Err(ModelError(format!(
                "Name must have at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        Ok(Self(s))
    }

    /// Creates a new name from an untrusted string `s`, without validation.  Useful for testing
    /// purposes only.
    #[cfg(test)]
    pub(crate) fn new_invalid<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl<'de> Deserialize<'de> for UserName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UserName::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl From<&'static str> for UserName {
    /// Creates a new name from a hardcoded string, which must be valid.
    fn from(name: &'static str) -> Self {
        UserName::new(name).expect("Hardcoded names for testing must be valid")
    }
}

/// Maximum length of an item description.
pub(crate) const MAX_ITEM_LENGTH: usize = 100;

/// Represents the description of the item purchased in an order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct ItemName(String);

impl ItemName {
    /// Creates a new item description from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.is_empty() {
            return Err(ModelError("Item cannot be empty".to_owned()));
        }
        if s.len() > MAX_ITEM_LENGTH {
            return Err(ModelError(format!(
                "Item must have at most {} characters",
                MAX_ITEM_LENGTH
            )));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the item description.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl<'de> Deserialize<'de> for ItemName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ItemName::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl From<&'static str> for ItemName {
    /// Creates a new item description from a hardcoded string, which must be valid.
    fn from(item: &'static str) -> Self {
        ItemName::new(item).expect("Hardcoded items for testing must be valid")
    }
}

/// Represents the number of units of an item in an order.  Always positive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Quantity(u32);

impl Quantity {
    /// Creates a new quantity from `qty`, making sure it is positive.
    pub(crate) fn new(qty: u32) -> ModelResult<Self> {
        if qty == 0 {
            return Err(ModelError("Quantity must be positive".to_owned()));
        }
        Ok(Self(qty))
    }

    /// Returns the quantity as a `u32`.
    pub(crate) fn as_u32(&self) -> u32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let qty = u32::deserialize(deserializer)?;
        Quantity::new(qty).map_err(serde::de::Error::custom)
    }
}

/// Number of records returned by a listing when the caller does not say how many it wants.
pub(crate) const DEFAULT_PAGE_LIMIT: usize = 10;

/// Maximum number of records a single listing request may return.
pub(crate) const MAX_PAGE_LIMIT: usize = 100;

/// A validated window over a collection listing.
#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct Pagination {
    /// Number of records to skip from the beginning of the collection.
    offset: usize,

    /// Maximum number of records to return.
    limit: usize,
}

impl Pagination {
    /// Creates a window from the raw `offset` and `limit` query values, applying defaults for
    /// the values the caller did not supply and validating the limit's bounds.
    pub(crate) fn new(offset: Option<u64>, limit: Option<u64>) -> ModelResult<Self> {
        let offset = usize::try_from(offset.unwrap_or(0))
            .map_err(|e| ModelError(format!("Offset cannot be represented: {}", e)))?;

        let limit = match limit {
            None => DEFAULT_PAGE_LIMIT,
            Some(limit) => {
                let limit = usize::try_from(limit)
                    .map_err(|e| ModelError(format!("Limit cannot be represented: {}", e)))?;
                if limit < 1 || limit > MAX_PAGE_LIMIT {
                    return Err(ModelError(format!(
                        "Limit must be between 1 and {}",
                        MAX_PAGE_LIMIT
                    )));
                }
                limit
            }
        };

        Ok(Self { offset, limit })
    }

    /// Returns the number of records to skip.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the maximum number of records to return.
    pub(crate) fn limit(&self) -> usize {
        self.limit
    }
}

/// A user tracked by the service.
#[derive(Clone, Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct User {
    /// Unique identifier of the user, assigned at creation time.
    id: UserId,

    /// Full name of the user.
    name: UserName,

    /// Contact email address of the user.
    email: EmailAddress,
}

/// An order placed by a user.
#[derive(Clone, Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Order {
    /// Unique identifier of the order, assigned at creation time.
    id: OrderId,

    /// Identifier of the user that placed the order.  Validated to reference an existing user
    /// when the order is created, and never re-validated afterwards.
    user_id: UserId,

    /// Description of the purchased item.
    item: ItemName,

    /// Number of units of the item.
    quantity: Quantity,
}
