//!
//! Asynchronous utilities for querying Source and GoldSrc game servers.
//!
//! The `srcq` crate implements Valve's A2S protocol to retrieve server metadata,
//! the player list and server rules. Queries never fail outright: an offline or
//! misbehaving server yields a placeholder result (`delay == -1`, `name == "N/A"`).
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! let client = srcq::A2sClientBuilder::default().build()?;
//! let info = client.query_server_info("192.168.1.1:27015").await;
//! if info.is_online() {
//!     println!("{} on {} ({} ms)", info.name, info.map, info.delay);
//! }
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod cursor;
pub mod dns;
pub mod errors;
pub mod models;
pub mod protocols;
pub mod transport;
pub mod util;

pub use crate::{
    address::ServerAddress,
    cursor::ByteCursor,
    models::*,
    protocols::a2s::{
        query_server_info, query_server_players, query_server_rules, A2sClient,
        A2sClientBuilder,
    },
    transport::{Transport, TransportResult, UdpTransport},
};
