use std::{fmt, net::Ipv4Addr, str::FromStr};

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1, take_while_m_n},
    character::complete::char,
    combinator::{eof, map, map_res, opt, peek, recognize, verify},
    multi::many1,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Host and port of a queried server, as typed by a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl Default for ServerAddress {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: 0,
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_label_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn octet(i: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 3, is_digit), u8::from_str)(i)
}

fn ipv4(i: &str) -> IResult<&str, String> {
    map(
        tuple((
            octet,
            preceded(char('.'), octet),
            preceded(char('.'), octet),
            preceded(char('.'), octet),
        )),
        |(a, b, c, d)| Ipv4Addr::new(a, b, c, d).to_string(),
    )(i)
}

/// Dotted hostname with at least two labels. A purely numeric last label is
/// rejected so that malformed IPv4 addresses do not pass as hostnames.
fn hostname(i: &str) -> IResult<&str, String> {
    map(
        verify(
            recognize(pair(
                take_while1(is_label_char),
                many1(pair(char('.'), take_while1(is_label_char))),
            )),
            |s: &str| s.rsplit('.').next().map_or(false, |tld| !tld.chars().all(is_digit)),
        ),
        String::from,
    )(i)
}

/// `:` or the full-width `：` followed by up to five digits.
fn port(i: &str) -> IResult<&str, u16> {
    preceded(
        alt((tag(":"), tag("\u{FF1A}"))),
        map_res(take_while_m_n(1, 5, is_digit), u16::from_str),
    )(i)
}

/// End of input, or trailing notes such as `" (EU)"` or `"/path"` left after the address.
fn boundary(i: &str) -> IResult<&str, &str> {
    peek(alt((
        eof,
        take_while1(|c: char| c.is_whitespace() || c == '/'),
    )))(i)
}

fn server_address(i: &str) -> IResult<&str, ServerAddress> {
    map(
        alt((
            terminated(pair(ipv4, opt(port)), boundary),
            terminated(pair(hostname, opt(port)), boundary),
        )),
        |(host, port)| ServerAddress {
            host,
            port: port.unwrap_or(0),
        },
    )(i)
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parses `host[:port]` at the start of `s`, falling back to `127.0.0.1:0` on
    /// anything unrecognized. Text after whitespace or `/` is ignored.
    ///
    /// Queries against the fallback address simply fail, which keeps free-text
    /// input from ever erroring out.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for ServerAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        server_address(s.trim())
            .map(|(_, addr)| addr)
            .map_err(|_| Error::InvalidAddress(s.to_string()))
    }
}
