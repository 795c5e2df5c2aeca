//! Resource model
//!
//! The entities the client reads and writes: [`Resource`], its compound
//! [`ResourceKey`], and the [`ResourceAddSpec`] payload used to create one.

mod types;

pub(crate) use types::require;
pub use types::{
    DeleteError, NameValuePair, Resource, ResourceAddSpec, ResourceFormat, ResourceKey,
    ResourceState,
};
