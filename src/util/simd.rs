//! Chunked byte-level helpers for the ASCII fast paths of analysis.

/// ASCII operations used by the tokenizer and the lowercase filter.
pub mod ascii {

    /// Lowercase ASCII text, processing 8 bytes at a time.
    ///
    /// Non-ASCII input must go through [`to_lowercase`] instead.
    pub fn to_lowercase_optimized(input: &str) -> String {
        let bytes = input.as_bytes();
        let mut result = Vec::with_capacity(bytes.len());

        let chunks = bytes.chunks_exact(8);
        let remainder = chunks.remainder();

        for chunk in chunks {
            let mut processed = [0u8; 8];
            for (i, &byte) in chunk.iter().enumerate() {
                processed[i] = byte.to_ascii_lowercase();
            }
            result.extend_from_slice(&processed);
        }

        result.extend(remainder.iter().map(u8::to_ascii_lowercase));

        // ASCII lowercasing maps ASCII bytes to ASCII bytes, so this cannot fail
        // for ASCII input; fall back to the Unicode path otherwise.
        String::from_utf8(result).unwrap_or_else(|_| input.to_lowercase())
    }

    /// Lowercase any text.
    ///
    /// Picks the chunked path for longer ASCII input and Unicode-aware
    /// lowercasing for everything else.
    pub fn to_lowercase(input: &str) -> String {
        if input.is_ascii() && input.len() >= 16 {
            to_lowercase_optimized(input)
        } else {
            input.to_lowercase()
        }
    }

    /// Whether an ASCII byte is Unicode `White_Space`.
    ///
    /// Unlike `u8::is_ascii_whitespace` this includes the vertical tab, so the
    /// ASCII path splits exactly where `char::is_whitespace` does.
    pub fn is_whitespace(byte: u8) -> bool {
        byte.is_ascii_whitespace() || byte == 0x0b
    }

    /// Find the first ASCII whitespace byte, scanning 8 bytes at a time.
    pub fn find_whitespace(input: &[u8]) -> Option<usize> {
        if input.len() < 8 {
            return input.iter().position(|&b| is_whitespace(b));
        }

        let chunks = input.chunks_exact(8);
        let remainder = chunks.remainder();

        for (chunk_idx, chunk) in chunks.enumerate() {
            if let Some(byte_idx) = chunk.iter().position(|&b| is_whitespace(b)) {
                return Some(chunk_idx * 8 + byte_idx);
            }
        }

        let base_offset = input.len() - remainder.len();
        remainder
            .iter()
            .position(|&b| is_whitespace(b))
            .map(|pos| base_offset + pos)
    }
}
