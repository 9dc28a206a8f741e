//! Data Transfer Objects for REST request/response serialization.

pub mod overlay_dto;

pub use overlay_dto::*;
