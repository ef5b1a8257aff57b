use crate::cursor::ByteCursor;

/// Response type announcing a challenge number.
pub const CHALLENGE_HEADER: char = 'A';

/// Query defines how to ask a server for one kind of data and how to read the answer.
pub trait Query {
    type Output: Default;

    /// Human readable name used in diagnostics.
    const NAME: &'static str;
    /// Response type carrying the requested data.
    const RESPONSE_HEADER: char;
    /// Whether the server may answer the first request without a challenge.
    const CHALLENGE_OPTIONAL: bool;

    /// Creates a request packet, echoing the challenge if there is one.
    fn make_request(challenge: Option<&[u8]>) -> Vec<u8>;
    /// Decodes the payload following the response header.
    fn parse_response(data: &mut ByteCursor) -> Self::Output;
}
