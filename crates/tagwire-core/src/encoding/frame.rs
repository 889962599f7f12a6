//! Length-prefix framing.
//!
//! Every span of bytes that crosses the wire is framed: a fixed-width
//! unsigned length prefix followed by exactly that many payload bytes. A
//! framed span is therefore self-delimiting; the byte count it occupies can
//! be determined without scanning past its end, which is what lets
//! [`unframe`] pull exactly one span off the front of a larger buffer.
//!
//! The prefix is a 4-byte big-endian `u32`, fixed for the whole system and
//! part of the wire-format contract.

use crate::error::CodecError;

/// Width of the length prefix in bytes.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Largest payload the length prefix can describe.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// Prepend a length prefix to `payload`.
///
/// # Errors
///
/// Returns [`CodecError::OversizedPayload`] if the payload does not fit the
/// fixed prefix width. The length is never silently truncated.
pub fn frame(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(LEN_PREFIX_SIZE + payload.len());
    frame_into(&mut out, payload)?;
    Ok(out)
}

/// Append a framed copy of `payload` to `buf`.
///
/// More efficient than [`frame`] when assembling a message from several
/// framed spans.
///
/// # Errors
///
/// Returns [`CodecError::OversizedPayload`] if the payload does not fit the
/// fixed prefix width.
pub fn frame_into(buf: &mut Vec<u8>, payload: &[u8]) -> Result<(), CodecError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| CodecError::OversizedPayload { len: payload.len(), max: MAX_PAYLOAD_LEN })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(payload);
    Ok(())
}

/// Split one framed payload off the front of `buffer`.
///
/// Returns the payload and everything after it. The remainder may itself
/// begin with another frame; callers iterate this to walk a concatenation of
/// framed spans.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedBuffer`] if the buffer is shorter than the
/// prefix, or shorter than the length the prefix declares.
pub fn unframe(buffer: &[u8]) -> Result<(&[u8], &[u8]), CodecError> {
    if buffer.len() < LEN_PREFIX_SIZE {
        return Err(CodecError::TruncatedBuffer {
            needed: LEN_PREFIX_SIZE,
            available: buffer.len(),
        });
    }
    let (prefix, rest) = buffer.split_at(LEN_PREFIX_SIZE);
    let prefix: [u8; LEN_PREFIX_SIZE] = prefix
        .try_into()
        .map_err(|_| CodecError::TruncatedBuffer { needed: LEN_PREFIX_SIZE, available: 0 })?;
    let declared = u32::from_be_bytes(prefix) as usize;
    if rest.len() < declared {
        return Err(CodecError::TruncatedBuffer { needed: declared, available: rest.len() });
    }
    Ok(rest.split_at(declared))
}
