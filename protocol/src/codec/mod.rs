//! # Canonical Encoder
//!
//! Protobuf is the only serialization that matters on the signing path: the
//! chain re-encodes nothing, it hashes exactly the bytes the wallet sent.
//! prost gives us the two properties that requires. Fields are emitted in
//! tag order, and varints are encoded identically on every platform.
//!
//! ```text
//! proto.rs    - hand-written prost structs for the Cosmos tx/bank/staking schemas
//! registry.rs - type-URL registry used to pack messages into `Any`
//! ```

pub mod proto;
pub mod registry;

pub use proto::{Any, SignMode};
pub use registry::{CodecError, Registry, TypeUrl};
