/// Data models for taskledger
///
/// Plain data structures shared across the store and service layers. All
/// persistence lives behind the [`crate::store`] traits; models carry no SQL.
///
/// # Models
///
/// - `user`: registered accounts (unique usernames, hashed credentials)
/// - `task`: owned to-do items

pub mod task;
pub mod user;
