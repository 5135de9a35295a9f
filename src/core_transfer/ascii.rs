//! Line-ending conversion for ASCII type transfers.

/// Native (LF) line breaks to network (CRLF) line breaks. Every LF gets a
/// CR in front, including one that already follows a CR.
pub fn native_to_ascii(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 32);
    for &byte in data {
        if byte == b'\n' {
            out.push(b'\r');
        }
        out.push(byte);
    }
    out
}

/// Network (CRLF) line breaks to native (LF) line breaks.
pub fn ascii_to_native(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().peekable();
    while let Some(&byte) = iter.next() {
        if byte == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(byte);
    }
    out
}
