//! Architect grammar resource for Switchboard
//!
//! A grammar owns one language per locale. Each language may reference a voice
//! and a dtmf grammar file, uploaded through a pre-signed URL once the language
//! exists.
//!
//! # Example Usage
//!
//! ```no_run
//! use switchboard_resource_api::{PlatformClient, ResourceRegistry, Timeouts};
//!
//! # fn client() -> PlatformClient { unimplemented!() }
//! let mut registry = ResourceRegistry::new();
//! switchboard_resource_grammar::register(&mut registry, &client(), Timeouts::default());
//! ```

mod client;
mod mapper;
mod metadata;
mod resource;
pub mod types;

pub use client::ArchitectGrammarProxy;
pub use metadata::TYPE_NAME;
pub use resource::GrammarResource;

switchboard_resource_api::register_resource!(GrammarResource);
