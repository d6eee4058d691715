// crates/types/src/ids.rs
//! Opaque row identifiers.
//!
//! Each table gets its own newtype so an exercise id can never be passed
//! where a group id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
        #[serde(transparent)]
        pub struct $name(#[ts(type = "number")] pub i64);

        impl $name {
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

row_id!(
    /// Primary key of `exercise_groups`.
    GroupId
);
row_id!(
    /// Primary key of `exercises`.
    ExerciseId
);
row_id!(
    /// Primary key of `workout_entries`.
    EntryId
);
