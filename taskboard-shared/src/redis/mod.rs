/// Redis connectivity
///
/// - `client`: connection management over `redis::aio::ConnectionManager`
///
/// The cache abstraction built on top of this lives in [`crate::cache`].

pub mod client;
