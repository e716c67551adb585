//! Numeric text formatting
//!
//! Converts integers, floats, and byte counts into text without any
//! host runtime. The pure `format_*` helpers write into caller-provided
//! buffers; the `Console` wrappers feed the result back into the
//! character stream.

use fbterm_video::Framebuffer;

use crate::console::Console;

/// Digit buffer capacity. 64 digits cover a base-2 u64.
pub const NUM_BUF_LEN: usize = 64;

/// Buffer size for [`format_float`]
pub const FLOAT_BUF_LEN: usize = 96;

/// Buffer size for [`format_bytes`]
pub const BYTES_BUF_LEN: usize = 32;

const BYTE_UNITS: [u8; 5] = [b' ', b'K', b'M', b'G', b'T'];

/// Integer power of ten. Wraps past u64 range; fractional precision for
/// large digit counts is limited anyway (see [`format_float`]).
fn pow10(n: usize) -> u64 {
    let mut value: u64 = 1;
    for _ in 0..n {
        value = value.wrapping_mul(10);
    }
    value
}

/// Format an unsigned integer into `buf`, least significant digit
/// first, and return the text slice.
///
/// Digits use '0'..'9' then 'A'.. for values >= 10. The result is
/// left-padded with `pad_char` to at least `min_digits` characters
/// (capped at the buffer size). `base` must be in 2..=36.
pub fn format_unsigned(
    buf: &mut [u8; NUM_BUF_LEN],
    mut value: u64,
    base: u8,
    min_digits: usize,
    pad_char: u8,
) -> &[u8] {
    debug_assert!((2..=36).contains(&base));

    let mut idx = buf.len();
    loop {
        let digit = (value % base as u64) as u8;
        idx -= 1;
        buf[idx] = if digit < 10 {
            b'0' + digit
        } else {
            b'A' + digit - 10
        };
        value /= base as u64;
        if value == 0 {
            break;
        }
    }

    while idx > buf.len().saturating_sub(min_digits) {
        idx -= 1;
        buf[idx] = pad_char;
    }

    &buf[idx..]
}

/// Format a signed float with a fixed number of fraction digits.
///
/// The fraction is computed by multiplying the remainder by
/// 10^fraction_digits in f64, so accuracy degrades for large digit
/// counts. That limitation is part of the contract.
pub fn format_float(buf: &mut [u8; FLOAT_BUF_LEN], value: f64, fraction_digits: usize) -> &[u8] {
    let mut pos = 0;
    let mut value = value;
    if value < 0.0 {
        buf[pos] = b'-';
        pos += 1;
        value = -value;
    }

    let int_part = value as u64;
    let mut digits = [0u8; NUM_BUF_LEN];

    let text = format_unsigned(&mut digits, int_part, 10, 0, b' ');
    buf[pos..pos + text.len()].copy_from_slice(text);
    pos += text.len();

    buf[pos] = b'.';
    pos += 1;

    let fraction = ((value - int_part as f64) * pow10(fraction_digits) as f64) as u64;
    let text = format_unsigned(&mut digits, fraction, 10, fraction_digits, b'0');
    buf[pos..pos + text.len()].copy_from_slice(text);
    pos += text.len();

    &buf[..pos]
}

/// Format a byte count with the largest unit among none/K/M/G/T whose
/// 1000^k divisor fits, e.g. `"  1.5 KB"`.
///
/// The quotient is space-padded to 3 digits and followed by one
/// fractional digit computed as `(remainder * 10) / divisor`.
pub fn format_bytes(buf: &mut [u8; BYTES_BUF_LEN], bytes: u64) -> &[u8] {
    let mut pos = 0;
    let mut unit: u64 = 1000u64.pow(BYTE_UNITS.len() as u32 - 1);

    for i in 0..BYTE_UNITS.len() {
        if bytes >= unit || unit == 1 {
            let mut digits = [0u8; NUM_BUF_LEN];

            let text = format_unsigned(&mut digits, bytes / unit, 10, 3, b' ');
            buf[pos..pos + text.len()].copy_from_slice(text);
            pos += text.len();

            buf[pos] = b'.';
            pos += 1;

            let text = format_unsigned(&mut digits, (bytes % unit) * 10 / unit, 10, 0, b' ');
            buf[pos..pos + text.len()].copy_from_slice(text);
            pos += text.len();

            buf[pos] = b' ';
            buf[pos + 1] = BYTE_UNITS[BYTE_UNITS.len() - 1 - i];
            buf[pos + 2] = b'B';
            pos += 3;
            break;
        }
        unit /= 1000;
    }

    &buf[..pos]
}

impl<F: Framebuffer> Console<F> {
    /// Print the bytes of pre-formatted text through the stream
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.print_byte(byte);
        }
    }

    /// Print an unsigned integer in the given base, left-padded with
    /// `pad_char` to at least `min_digits` characters
    pub fn print_num_pad(&mut self, value: u64, base: u8, min_digits: usize, pad_char: u8) {
        let mut buf = [0u8; NUM_BUF_LEN];
        let text = format_unsigned(&mut buf, value, base, min_digits, pad_char);
        self.write_bytes(text);
    }

    /// Print an unsigned integer in the given base, unpadded
    pub fn print_num(&mut self, value: u64, base: u8) {
        self.print_num_pad(value, base, 0, b' ');
    }

    /// Print an unsigned integer in decimal
    pub fn print_dec(&mut self, value: u64) {
        self.print_num(value, 10);
    }

    /// Print an unsigned integer in hexadecimal
    pub fn print_hex(&mut self, value: u64) {
        self.print_num(value, 16);
    }

    /// Print a signed float with a fixed number of fraction digits
    pub fn print_float(&mut self, value: f64, fraction_digits: usize) {
        let mut buf = [0u8; FLOAT_BUF_LEN];
        let text = format_float(&mut buf, value, fraction_digits);
        self.write_bytes(text);
    }

    /// Print a human-readable byte count
    pub fn print_size(&mut self, bytes: u64) {
        let mut buf = [0u8; BYTES_BUF_LEN];
        let text = format_bytes(&mut buf, bytes);
        self.write_bytes(text);
    }
}
