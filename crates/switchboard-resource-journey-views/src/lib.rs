//! Journey views resource for Switchboard
//!
//! A view is a graph of elements linked by `followed_by` edges plus charts
//! whose metrics point back at elements. Updates never edit a view in place,
//! they save a new version on top of the latest one.

mod client;
mod mapper;
mod metadata;
mod resource;
pub mod types;

pub use client::JourneyViewProxy;
pub use metadata::TYPE_NAME;
pub use resource::JourneyViewResource;

switchboard_resource_api::register_resource!(JourneyViewResource);
