//! Shared test infrastructure
//!
//! Helpers for exercising services without live infrastructure: a wiremock
//! stand-in for the delivery gateway, offline database pools, and payload
//! builders.

pub mod gateway_mock;
pub mod test_data;

#[allow(unused_imports)]
pub use gateway_mock::GatewayMockServer;
#[allow(unused_imports)]
pub use test_data::{lazy_pool, test_settings};
