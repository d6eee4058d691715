// crates/types/src/lib.rs
//! Domain types shared by the liftlog store, core and HTTP API.

pub mod ids;
pub mod models;
pub mod notice;
pub mod weight;

pub use ids::*;
pub use models::*;
pub use notice::*;
pub use weight::*;
