/// Business logic for taskledger
///
/// Services orchestrate the auth primitives and the store traits. They are
/// constructed once at startup with their dependencies injected and are
/// cheap to clone (shared `Arc` internals, no per-request state).
///
/// # Modules
///
/// - [`auth`]: registration and login (credential verification, token issue)
/// - [`tasks`]: owner-scoped task CRUD with ownership collapsing

pub mod auth;
pub mod tasks;
