use bytes::{BufMut, BytesMut};

use crate::cursor::SIMPLE_RESPONSE_PREFIX;

/// Challenge value sent before the server has handed out a real one.
pub const NO_CHALLENGE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Builds `FFFFFFFF <kind> <body> <challenge>`.
pub fn make_request_packet(kind: u8, body: &[u8], challenge: &[u8]) -> Vec<u8> {
    let mut out =
        BytesMut::with_capacity(SIMPLE_RESPONSE_PREFIX.len() + 1 + body.len() + challenge.len());
    out.put_slice(&SIMPLE_RESPONSE_PREFIX);
    out.put_u8(kind);
    out.put_slice(body);
    out.put_slice(challenge);
    out.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_layout() {
        let expectation = vec![0xFF, 0xFF, 0xFF, 0xFF, 0x55, 0xFF, 0xFF, 0xFF, 0xFF];

        let result = make_request_packet(b'U', &[], &NO_CHALLENGE);

        assert_eq!(expectation, result);
    }
}
