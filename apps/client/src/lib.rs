//! Client side of the Iris prediction API: collect four measurements, send
//! them to the service and render the answer.

pub mod client;
pub mod form;
pub mod render;

pub use client::{ApiClient, ClientError};
pub use form::Measurements;
