//! Domain primitives shared by the Dogland backend and client crates.
//!
//! Nothing in here touches the database or the network: types, the error
//! taxonomy, pagination clamping, geographic helpers and the request
//! schema validator.

pub mod error;
pub mod geo;
pub mod pagination;
pub mod types;
pub mod validation;
