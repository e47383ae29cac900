//! h2-header-writer: A resumable, sans-I/O HPACK header block encoder
//!
//! This crate turns a response's header fields into HPACK-encoded bytes
//! (RFC 7541), split correctly across one HEADERS frame and any number of
//! CONTINUATION frames, while sharing one dynamic table across every
//! response on a connection.
//!
//! # Features
//!
//! - **Sans-I/O Design**: No async runtime dependencies (no tokio); you own
//!   the buffers and the frame boundaries
//! - **Resumable**: A header block that outgrows one frame picks up in the
//!   next frame at the exact value it stopped at — multi-valued headers
//!   included
//! - **Connection-Scoped Compression**: One [`FieldEncoder`] per connection
//!   keeps the HPACK dynamic table warm across responses
//! - **Sensible Indexing Policy**: `set-cookie` and `content-disposition`
//!   are emitted never-indexed, `content-length` stays out of the dynamic
//!   table, everything else is indexed for reuse
//! - **Bounded Buffers**: Every write targets a caller-sized `&mut [u8]`;
//!   a field that doesn't fit leaves the buffer byte-for-byte untouched
//!
//! # Quick Start
//!
//! ```rust
//! use h2_header_writer::{
//!     begin_response, continue_block, FieldEncoder, HeaderCursor, HeaderSet,
//!     ResponseHeaders, WriteResult,
//! };
//!
//! let mut headers = ResponseHeaders::new();
//! headers.append("content-type", "text/plain");
//! headers.append("set-cookie", "id=1");
//!
//! // One encoder per connection; one cursor per header block.
//! let mut encoder = FieldEncoder::new();
//! let mut cursor = HeaderCursor::new(HeaderSet::Response(&headers));
//!
//! let mut frame = [0u8; 256];
//! let (len, mut state) = begin_response(200, &mut cursor, &mut encoder, &mut frame).unwrap();
//! // ... emit a HEADERS frame carrying frame[..len] ...
//! assert!(len > 0);
//!
//! while state == WriteResult::MoreHeaders {
//!     let (len, next) = continue_block(&mut cursor, &mut encoder, &mut frame);
//!     // ... emit a CONTINUATION frame carrying frame[..len] ...
//!     # let _ = len;
//!     state = next;
//! }
//! assert_eq!(state, WriteResult::Done);
//! ```
//!
//! # Architecture
//!
//! This crate is intentionally minimal. It provides:
//! - Header storage and a resumable field cursor ([`ResponseHeaders`],
//!   [`HeaderCursor`])
//! - The per-connection compression context ([`FieldEncoder`])
//! - The per-frame encode driver ([`begin_response`], [`begin_trailers`],
//!   [`continue_block`], the `retry_begin_*` replays)
//!
//! It does NOT provide:
//! - Frame headers, flow control, or stream multiplexing (you decide where
//!   HEADERS ends and CONTINUATION begins from the returned [`WriteResult`])
//! - TCP/TLS transport
//! - HPACK decoding (the receive side is a separate concern)
//!
//! # Driving the state machine
//!
//! Each call encodes one frame's payload. [`WriteResult::Done`] closes the
//! block (set END_HEADERS), [`WriteResult::MoreHeaders`] asks for a
//! CONTINUATION frame, and [`WriteResult::BufferTooSmall`] means the
//! pending field is bigger than the whole buffer: discard it, grow, and
//! replay via [`retry_begin_response`] / [`retry_begin_trailers`]. Fatal
//! `Err`s only occur when the mandatory block preamble (dynamic-table size
//! update, `:status`) cannot fit, which no retry within the block can fix.

pub mod encoder;
pub mod field;
pub mod headers;
pub mod static_table;
pub mod writer;

pub use encoder::{DynamicTable, EncodingStrategy, FieldEncoder, DEFAULT_DYNAMIC_TABLE_SIZE};
pub use headers::{HeaderCursor, HeaderSet, ResponseHeaders};
pub use writer::{
    begin_response, begin_trailers, continue_block, resolve_strategy, retry_begin_response,
    retry_begin_trailers, WriteResult,
};
