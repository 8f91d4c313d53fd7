//! Rust-native rendition of the Surface tracking runtime.
//!
//! A [`Tracker`] is activated against a [`PageContext`], emits the
//! `script_initialized` and `page_view` events, then derives further events
//! from [`DomEvent`]s handed to [`Tracker::observe`]. Delivery goes through a
//! [`Transport`] and is fire-and-forget.

pub mod context;
pub mod dom;
pub mod error;
pub mod mask;
pub mod tag_id;
pub mod tracker;
pub mod transport;
pub mod visitor;

pub use context::PageContext;
pub use dom::{DomEvent, ElementSnapshot, FormSnapshot, InputSnapshot, OwnerForm};
pub use error::TrackerError;
pub use mask::mask_email;
pub use tag_id::{FALLBACK_TAG_ID, resolve_ingestion_endpoint, resolve_tag_id};
pub use tracker::{EventPayload, Tracker};
pub use transport::{HttpTransport, SharedTransport, Transport};
pub use visitor::VisitorId;
