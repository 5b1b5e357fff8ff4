//! Application layer orchestrating a scenario request.
//!
//! [`service::ScenarioService`] owns the account store and the engine. It
//! resolves every account reference in a request to a snapshot, then hands
//! the fully specified request to the synchronous engine.

pub mod service;
