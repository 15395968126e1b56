//! Outbound digital rule set resource for Switchboard
//!
//! A rule set is a single object holding ordered rules, each with conditions
//! and actions expressed as optional settings blocks. There are no children,
//! so every write is one remote call.

mod client;
mod mapper;
mod metadata;
mod resource;
pub mod types;

pub use client::OutboundDigitalRuleSetProxy;
pub use metadata::TYPE_NAME;
pub use resource::DigitalRuleSetResource;

switchboard_resource_api::register_resource!(DigitalRuleSetResource);
