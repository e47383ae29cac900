//! The frame-level encode driver.
//!
//! A header block rarely fits one frame, so encoding is a resumable state
//! machine driven once per physical frame: `begin_response`/`begin_trailers`
//! open a block, `continue_block` fills each CONTINUATION frame, and the
//! `retry_begin_*` entry points replay a first frame that came back as
//! [`WriteResult::BufferTooSmall`]. The cursor's position is the only
//! carry-over between calls; the caller decides frame boundaries from the
//! returned state.

use crate::encoder::{EncodingStrategy, FieldEncoder};
use crate::field::{self, Name};
use crate::headers::HeaderCursor;
use crate::static_table;

/// Outcome of one frame's worth of encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// Every field of the block is in the buffer; the frame ends the block.
    Done,
    /// The buffer filled up with at least one field written; emit the frame
    /// and call [`continue_block`] with the next one.
    MoreHeaders,
    /// The field at the cursor does not fit even an empty frame. Discard
    /// the buffer, allocate a strictly larger one, and replay through
    /// [`retry_begin_response`] / [`retry_begin_trailers`] — the cursor has
    /// not moved past the failing field.
    BufferTooSmall,
}

/// Map a header's identity to how it may use the dynamic table.
///
/// Sensitive headers (`set-cookie`, `content-disposition`) must never be
/// cached by intermediaries; `content-length` changes every response, so
/// indexing it would only churn the table. Everything else is allowed in.
/// Matching is by static-table identity when the hint is present, by
/// case-insensitive name otherwise.
pub fn resolve_strategy(static_index: Option<usize>, name: &str) -> EncodingStrategy {
    match static_index {
        Some(static_table::SET_COOKIE) | Some(static_table::CONTENT_DISPOSITION) => {
            EncodingStrategy::NeverIndex
        }
        Some(static_table::CONTENT_LENGTH) => EncodingStrategy::IgnoreIndex,
        Some(_) => EncodingStrategy::Index,
        None => {
            if name.eq_ignore_ascii_case("set-cookie")
                || name.eq_ignore_ascii_case("content-disposition")
            {
                EncodingStrategy::NeverIndex
            } else {
                EncodingStrategy::Index
            }
        }
    }
}

/// Open a response header block: dynamic-table size update, `:status`, then
/// as many header fields as fit.
///
/// Returns the bytes written and the block state. `Err` only when the
/// mandatory preamble itself cannot fit — that means the caller handed a
/// buffer too small to ever make progress, which growing within this block
/// cannot fix.
pub fn begin_response(
    status: u16,
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
) -> Result<(usize, WriteResult), String> {
    begin_block(Some(status), cursor, encoder, buf, true)
}

/// Open a trailer block: like [`begin_response`] without the `:status`
/// field.
pub fn begin_trailers(
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
) -> Result<(usize, WriteResult), String> {
    begin_block(None, cursor, encoder, buf, true)
}

/// Replay a response block's first frame after [`WriteResult::BufferTooSmall`].
///
/// Re-emits the preamble but does not advance the cursor: it is already
/// parked on the field that failed to fit. Runs with buffer growth turned
/// off — if the grown buffer still cannot take the field, the preamble-only
/// frame ships as `MoreHeaders` instead of asking for a third size.
pub fn retry_begin_response(
    status: u16,
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
) -> Result<(usize, WriteResult), String> {
    begin_block(Some(status), cursor, encoder, buf, false)
}

/// Replay a trailer block's first frame after [`WriteResult::BufferTooSmall`].
pub fn retry_begin_trailers(
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
) -> Result<(usize, WriteResult), String> {
    begin_block(None, cursor, encoder, buf, false)
}

/// Fill one CONTINUATION frame from the cursor's current position.
///
/// Must follow a call that returned `MoreHeaders`. No mandatory preamble
/// here, so there is no fatal path; an oversized field at the head of the
/// frame still reports `BufferTooSmall` (retry this same call with a larger
/// buffer).
pub fn continue_block(
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
) -> (usize, WriteResult) {
    encode_core(cursor, encoder, buf, true)
}

/// Shared begin-of-block path for first frames and their retries. A first
/// attempt advances the cursor onto its first field and may still ask for a
/// larger buffer; a retry does neither — the cursor is parked on the field
/// the failed attempt could not fit.
fn begin_block(
    status: Option<u16>,
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
    first_attempt: bool,
) -> Result<(usize, WriteResult), String> {
    let queued_update = encoder.queued_size_update();

    let mut written = encoder.ensure_size_update(buf).ok_or_else(|| {
        format!(
            "dynamic table size update does not fit in a {}-byte buffer",
            buf.len()
        )
    })?;

    if let Some(status) = status {
        written += encode_status(status, &mut buf[written..]).ok_or_else(|| {
            format!(
                ":status {} does not fit in a {}-byte buffer",
                status,
                buf.len()
            )
        })?;
    }

    if first_attempt && !cursor.advance() {
        return Ok((written, WriteResult::Done));
    }

    let (body, result) = encode_core(cursor, encoder, &mut buf[written..], first_attempt);
    if result == WriteResult::BufferTooSmall {
        // The whole frame is discarded, so the size update it carried never
        // reaches the peer; queue it again for the replay.
        encoder.requeue_size_update(queued_update);
        return Ok((0, WriteResult::BufferTooSmall));
    }
    Ok((written + body, result))
}

/// `:status` gets a dedicated path: the seven table-resident codes collapse
/// to a one-byte indexed field, everything else is a literal against the
/// `:status` name index. Never enters the dynamic table.
fn encode_status(status: u16, buf: &mut [u8]) -> Option<usize> {
    match static_table::status_index(status) {
        Some(index) => field::indexed(index, buf),
        None => field::literal_without_indexing(
            Name::Index(static_table::STATUS),
            &status.to_string(),
            buf,
        ),
    }
}

/// The core loop: encode fields from the cursor until the collection ends
/// or the buffer fills. The cursor is only advanced past a field once its
/// bytes are in the buffer, so whatever field a failure leaves behind is
/// the next frame's first field.
fn encode_core(
    cursor: &mut HeaderCursor<'_>,
    encoder: &mut FieldEncoder,
    buf: &mut [u8],
    may_request_larger_buffer: bool,
) -> (usize, WriteResult) {
    let mut written = 0;
    loop {
        let Some((name, value)) = cursor.current() else {
            return (written, WriteResult::Done);
        };
        let strategy = resolve_strategy(cursor.static_index(), name);
        match encoder.encode_field(&mut buf[written..], cursor.static_index(), strategy, name, value)
        {
            Some(field_len) => {
                written += field_len;
                if !cursor.advance() {
                    return (written, WriteResult::Done);
                }
            }
            None => {
                if written == 0 && may_request_larger_buffer {
                    return (0, WriteResult::BufferTooSmall);
                }
                return (written, WriteResult::MoreHeaders);
            }
        }
    }
}
