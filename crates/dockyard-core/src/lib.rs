//! Core library for Dockyard
//!
//! Value types shared by the resolution engine and its callers:
//! - [`ImageName`] and its builder, the identity every lookup is keyed by
//! - [`ScmEntry`], one parsed line of a library file
//! - [`SourceConfig`], the layered configuration of a library source

pub mod config;
pub mod entry;
pub mod error;
pub mod image;

pub use config::SourceConfig;
pub use entry::ScmEntry;
pub use error::{Error, Result};
pub use image::{ImageName, ImageNameBuilder};
