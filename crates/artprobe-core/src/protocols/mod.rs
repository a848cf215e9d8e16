//! Protocol encoding and decoding modules.
//!
//! Art-Net follows a layered structure:
//! - `layout`: field descriptors (source of truth for offsets and byte order)
//! - `reader` / `writer`: safe byte access applying the layout conventions
//! - one module per packet kind with its typed record
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; the `transport` module handles sockets.

pub mod artnet;
pub(crate) mod common;
