//! Host-side glue for the Varonia back office.
//!
//! - [`store`] - owned spatial snapshot with its load status
//! - [`paths`] - config directory resolution
//! - [`messaging`] - back-office message formatting and the transport seam
//!
//! Decoding and coordinate conversion live in `varonia_core`, re-exported
//! here as [`spatial`].

pub mod constants;
pub mod messaging;
pub mod paths;
pub mod store;

pub use varonia_core as spatial;

pub use messaging::{format_message, BackOfficeMessage, SoftState, Transport, TransportEvent};
pub use paths::{ConfigDirectory, FixedDirectory, LocalLowDirectory};
pub use store::{LoadStatus, SpatialStore};
