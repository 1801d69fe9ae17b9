pub mod normalizer;
pub mod response;
pub mod service;
