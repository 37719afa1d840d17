//! ngxkit Core Library
//!
//! This crate provides the typed configuration model shared by the parser
//! and the renderer: servers, locations, upstreams and the property groups
//! attached to them.

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    AccessAction, AccessRule, ErrorPage, Location, ModelLoader, ParseUnit, PropertyGroup,
    Server, SetHeader, StatusMatch, Upstream,
};

/// ngxkit version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
