pub mod client;
pub mod dto;
pub mod error;
pub mod http;

pub use client::{GatewayResult, PostGateway};
pub use error::GatewayError;
pub use http::HttpGateway;
