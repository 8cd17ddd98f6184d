//! Byte-level codecs shared by the archive builders: a lossless
//! UTF-16 to UTF-8 transcoder, a Base64 encoder, the Base64 VLQ decoder
//! used by source-map style tooling, and a table-driven 32-bit CRC.

use std::sync::OnceLock;

use crate::error::ArchiveError;

/// Base64 encoding alphabet.
const BASE64_CHARS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const BASE64_PAD: u8 = b'=';

/// Map ASCII code of an encoded character back to its sextet, -1 when the
/// byte is outside the alphabet.
const FROM_BASE64: [i8; 256] = {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < 64 {
        table[BASE64_CHARS[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// UTF-8 encode a sequence of UTF-16 code units.
///
/// The transform is reversible for any input, valid or not: a surrogate
/// pair becomes one 4-byte sequence consuming both units, while an
/// unpaired surrogate is stored as the 3-byte form of its own 16-bit
/// value instead of being replaced or rejected.
pub fn encode_utf8(units: &[u16]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(units.len() * 3);
    encode_utf8_into(units, &mut encoded);
    encoded
}

/// Caller-buffer form of [`encode_utf8`]: appends to `dst` and returns
/// the number of bytes written.
pub fn encode_utf8_into(units: &[u16], dst: &mut Vec<u8>) -> usize {
    let start = dst.len();
    let mut pos = 0;

    while pos < units.len() {
        let code = units[pos];
        pos += 1;

        if code < 0x80 {
            dst.push(code as u8);
        } else if code < 0x800 {
            dst.push(0b1100_0000 | (code >> 6) as u8);
            dst.push(0b1000_0000 | (code & 0b11_1111) as u8);
        } else {
            if code & 0xFC00 == 0xD800 {
                // High surrogate. Re-encode only if a low surrogate
                // follows; otherwise both halves keep their 3-byte form
                // so the decoded result is unaltered.
                let next = units.get(pos).copied().unwrap_or(0);

                if next & 0xFC00 == 0xDC00 {
                    pos += 1;
                    let code = 0x10000
                        + ((u32::from(code) - 0xD800) << 10)
                        + (u32::from(next) - 0xDC00);

                    dst.push(0b1111_0000 | (code >> 18) as u8);
                    dst.push(0b1000_0000 | ((code >> 12) & 0b11_1111) as u8);
                    dst.push(0b1000_0000 | ((code >> 6) & 0b11_1111) as u8);
                    dst.push(0b1000_0000 | (code & 0b11_1111) as u8);
                    continue;
                }
            }

            dst.push(0b1110_0000 | (code >> 12) as u8);
            dst.push(0b1000_0000 | ((code >> 6) & 0b11_1111) as u8);
            dst.push(0b1000_0000 | (code & 0b11_1111) as u8);
        }
    }

    dst.len() - start
}

/// Base64 encode bytes using the standard alphabet with `=` padding.
pub fn encode_base64(src: &[u8]) -> String {
    let mut encoded = String::with_capacity(src.len().div_ceil(3) * 4);
    encode_base64_into(src, &mut encoded);
    encoded
}

/// Caller-buffer form of [`encode_base64`]: appends to `dst`.
pub fn encode_base64_into(src: &[u8], dst: &mut String) {
    for group in src.chunks(3) {
        let a = group[0];
        let b = group.get(1).copied();
        let c = group.get(2).copied();

        // Missing trailing bytes contribute zero bits and turn the
        // matching output characters into padding.
        let sextets = [
            Some(a >> 2),
            Some((a & 0b11) << 4 | b.unwrap_or(0) >> 4),
            b.map(|b| (b & 0b1111) << 2 | c.unwrap_or(0) >> 6),
            c.map(|c| c & 0b11_1111),
        ];

        for sextet in sextets {
            dst.push(match sextet {
                Some(bits) => BASE64_CHARS[bits as usize] as char,
                None => BASE64_PAD as char,
            });
        }
    }
}

/// Decode a string of Base64 variable-length quantities, as seen in
/// source maps: 5-bit groups assembled low-to-high, continuation
/// signalled by bit 5 of each sextet, sign carried in the low bit of the
/// reassembled magnitude.
///
/// Input that ends with the continuation bit still set is rejected with
/// [`ArchiveError::TruncatedVlq`]; bytes outside the alphabet (padding
/// included, which VLQ streams never contain) with
/// [`ArchiveError::InvalidBase64Character`].
pub fn decode_base64_vlq(src: &str) -> Result<Vec<i64>, ArchiveError> {
    let mut decoded = Vec::new();
    let mut num: i64 = 0;
    let mut shift = 0;

    for byte in src.bytes() {
        let code = FROM_BASE64[byte as usize];
        if code < 0 {
            return Err(ArchiveError::InvalidBase64Character(char::from(byte)));
        }

        num += i64::from(code & 31) << shift;

        if code & 32 != 0 {
            shift += 5;
        } else {
            let sign = num & 1;
            decoded.push(if sign != 0 { -(num >> 1) } else { num >> 1 });

            shift = 0;
            num = 0;
        }
    }

    if shift != 0 {
        return Err(ArchiveError::TruncatedVlq);
    }

    Ok(decoded)
}

/// Reversed CRC-32 generator polynomial used by Ethernet, GZIP and PNG.
pub const CRC32_DEFAULT_POLYNOMIAL: u32 = 0xEDB88320;

/// 32-bit Cyclic Redundancy Check: a 256-entry table for one reflected
/// polynomial, built once and shared read-only by any number of hashers.
#[derive(Debug, Clone)]
pub struct Crc32 {
    table: [u32; 256],
}

impl Crc32 {
    /// Table for [`CRC32_DEFAULT_POLYNOMIAL`].
    pub fn new() -> Crc32 {
        Crc32::with_polynomial(CRC32_DEFAULT_POLYNOMIAL)
    }

    /// Table for an alternate reversed polynomial, e.g. `0x82F63B78`
    /// (Castagnoli) or `0xEB31D82E` (Koopman).
    pub fn with_polynomial(poly: u32) -> Crc32 {
        let mut table = [0u32; 256];

        for (n, entry) in table.iter_mut().enumerate() {
            let mut crc = n as u32;
            for _ in 0..8 {
                crc = (crc >> 1) ^ (if crc & 1 != 0 { poly } else { 0 });
            }
            *entry = crc;
        }

        Crc32 { table }
    }

    /// Process-wide table for the default polynomial, built on first use.
    pub fn shared() -> &'static Crc32 {
        static SHARED: OnceLock<Crc32> = OnceLock::new();
        SHARED.get_or_init(Crc32::new)
    }

    pub fn hasher(&self) -> Hasher32<'_> {
        Hasher32 {
            table: &self.table,
            crc: !0,
        }
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Crc32::new()
    }
}

/// Running CRC state over a shared table. `update` may be called any
/// number of times to hash a stream incrementally; `finalize` exposes the
/// one's-complement checksum without ending the stream.
#[derive(Debug, Clone)]
pub struct Hasher32<'a> {
    table: &'a [u32; 256],
    crc: u32,
}

impl Hasher32<'_> {
    pub fn update(&mut self, bytes: &[u8]) {
        let mut crc = self.crc;

        for &byte in bytes {
            crc = (crc >> 8) ^ self.table[((crc ^ u32::from(byte)) & 0xFF) as usize];
        }

        self.crc = crc;
    }

    pub fn finalize(&self) -> u32 {
        !self.crc
    }
}

/// One-shot CRC-32 with the default polynomial over the shared table.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32::shared().hasher();
    hasher.update(bytes);
    hasher.finalize()
}
