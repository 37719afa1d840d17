//! Configuration model
//!
//! Value records produced by the parser and consumed by the renderer.

mod loader;
mod properties;
mod types;

pub use loader::ModelLoader;
pub use properties::{AccessAction, AccessRule, ErrorPage, PropertyGroup, SetHeader, StatusMatch};
pub use types::{Location, ParseUnit, Server, Upstream};
