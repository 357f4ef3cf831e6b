//! Strongly-typed id newtypes for each table.
//!
//! Every table uses a SQLite `INTEGER PRIMARY KEY`, so each id wraps an
//! `i64`. The wrappers keep a student's row id from being passed where the
//! identity id is expected.
//!
//! # Example
//!
//! ```ignore
//! use ecam_models::ids::{IdentityId, StudentId};
//!
//! fn load_student(id: StudentId) { /* ... */ }
//!
//! load_student(StudentId::from(3));
//! // load_student(IdentityId::from(3)); // Compile error! Type mismatch.
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Defines an `i64` id newtype that encodes to SQLite and JSON as the bare
/// integer.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = i64)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Id of a row in `persons`; the identity behind every role.
    IdentityId
);

define_id!(
    /// Id of a row in `admins`.
    AdminId
);

define_id!(
    /// Id of a row in `students`. Not to be confused with the school-issued
    /// student code (matricule).
    StudentId
);

define_id!(
    /// Id of a row in `teachers`.
    TeacherId
);
