//! Data models for the StackIt client.
//!
//! These match the backend wire format exactly so responses merge straight
//! into the canonical collections.

mod notification;
mod question;
mod stats;
mod tag;
mod user;

pub use notification::*;
pub use question::*;
pub use stats::*;
pub use tag::*;
pub use user::*;
