//! Org-wide routing utilization resource for Switchboard
//!
//! The organisation holds exactly one utilization object with an optional
//! block per media type and a list of label settings. Creating it replaces the
//! current settings and deleting it resets them to the platform defaults.

mod client;
mod mapper;
mod metadata;
mod resource;
pub mod types;

pub use client::RoutingUtilizationProxy;
pub use metadata::TYPE_NAME;
pub use resource::UtilizationResource;

switchboard_resource_api::register_resource!(UtilizationResource);
