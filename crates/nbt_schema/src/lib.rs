//! Schemas describe the expected shape of an NBT tree, and the verifier checks a tree
//! against one.
//!
//! # Schema Nodes
//!
//! | Node       | Matches                     | Checks                                              |
//! |------------|-----------------------------|-----------------------------------------------------|
//! | `Scalar`   | One numeric tag             | Exact tag type, no widening                         |
//! | `String`   | `TAG_STRING`                | Fixed value and maximum length in characters        |
//! | `Array`    | `TAG_BYTE_ARRAY` or `TAG_INT_ARRAY` | Array type and exact length                 |
//! | `List`     | `TAG_LIST`                  | Element type when not empty, exact length, and every element against a subschema |
//! | `Compound` | `TAG_COMPOUND`              | Every child schema against the tag of the same name |
//!
//! Tags not named by a compound schema are ignored.
//!
//! ## Options
//!
//! - **`OPTIONAL`**: the tag may be missing.
//! - **`CREATE_ON_MISSING`**: [`NbtVerifier::verify_and_create`] inserts the schema's
//!   default tree when the tag is missing.
//!
//! ## Events
//!
//! Failures are reported to a [`events::VerifierEvents`] handler, which may forgive
//! them. The default handler logs through `tracing`.
//!

pub mod error;
pub mod events;
pub mod node;
pub mod verify;

pub use events::{CollectingEvents, LoggingEvents, TagEventCode, VerifierEvents};
pub use node::{
    ArrayKind, SchemaArray, SchemaCompound, SchemaList, SchemaNode, SchemaOptions, SchemaScalar,
    SchemaString,
};
pub use verify::{verify, verify_and_create, NbtVerifier};
