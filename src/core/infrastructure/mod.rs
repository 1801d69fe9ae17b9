pub mod api_client;
pub mod upstream_api;
