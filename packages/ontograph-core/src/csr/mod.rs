//! CSR storage primitives
//!
//! - `StaticCsrArray` / `CsrArrayBuilder`: row-pointer/indices/data layout
//! - `DataIndexer`: bit access over `u8`/`u16`/`u32`/`u64` payloads
//! - `RelationCodec`: relationship type → payload bit mapping

pub mod array;
pub mod codec;
pub mod indexer;

pub use array::{CsrArrayBuilder, StaticCsrArray};
pub use codec::RelationCodec;
pub use indexer::{DataIndexer, PayloadWidth};
