//! Character conversion pipeline.
//!
//! This module turns arbitrary Unicode text into the byte stream a character
//! ROM can render:
//!
//! 1. **Reverse lookup** - invert a ROM table into glyph -> output mappings
//! 2. **Resolution** - map one character through the layered policy
//!    (passthrough, table, custom, fallback, unmapped policy)
//! 3. **Batch conversion** - whole-text runs with a result summary
//! 4. **Encoding** - emit the single-byte-per-character output buffer

mod batch;
mod context;
mod encode;
mod lookup;
mod resolver;

pub use batch::{convert_text, summarize, ConversionSummary};
pub use context::Converter;
pub use encode::{encode_entries, output_file_name, DEFAULT_PLACEHOLDER, PLACEHOLDER_BYTE};
pub use lookup::{build_reverse_lookup, ReverseLookup};
pub use resolver::{resolve, Alternative, ConversionEntry, MapStatus, UnmappedPolicy};
