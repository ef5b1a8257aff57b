//! Valve's A2S server query protocol.
//!
//! Every query is a challenge-response exchange of at most two datagrams.
//! Failures never surface to callers of the `query_*` functions: they get a
//! placeholder result instead, see [`SourceServerInfo::is_online`].

mod info;
mod player;
mod rules;

pub use self::{info::InfoQuery, player::PlayerQuery, rules::RulesQuery};

use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    address::ServerAddress,
    cursor::ByteCursor,
    dns::{self, Resolver},
    errors::{self, QueryError},
    models::{SourceServerInfo, SourceServerPlayers, SourceServerRules},
    protocols::models::{Query, CHALLENGE_HEADER},
    transport::{Transport, UdpTransport, DEFAULT_TIMEOUT},
};

/// Runs A2S queries over a [`Transport`].
#[derive(Clone, Debug)]
pub struct A2sClient<T = UdpTransport> {
    transport: T,
}

impl<T: Transport> A2sClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs the handshake and leaves the cursor right after the response header.
    async fn exchange<Q: Query>(&self, addr: &ServerAddress) -> Result<ByteCursor, QueryError> {
        let request = Q::make_request(None);
        let data = self
            .transport
            .send(addr, &request)
            .await
            .map_err(QueryError::RequestFailed)?;

        let mut cursor = ByteCursor::new(data);
        match cursor.header() {
            Some(CHALLENGE_HEADER) => {}
            Some(h) if Q::CHALLENGE_OPTIONAL && h == Q::RESPONSE_HEADER => return Ok(cursor),
            got => {
                return Err(QueryError::InvalidHeader {
                    expected: CHALLENGE_HEADER,
                    got,
                })
            }
        }

        let challenge = cursor.bytes();
        let request = Q::make_request(Some(&challenge[..]));
        let data = self
            .transport
            .send(addr, &request)
            .await
            .map_err(QueryError::ChallengeRoundTripFailed)?;

        cursor.reset(data);
        match cursor.header() {
            Some(h) if h == Q::RESPONSE_HEADER => Ok(cursor),
            got => Err(QueryError::InvalidHeader {
                expected: Q::RESPONSE_HEADER,
                got,
            }),
        }
    }

    pub async fn try_query<Q: Query>(&self, addr: &ServerAddress) -> Result<Q::Output, QueryError> {
        let mut data = self.exchange::<Q>(addr).await?;
        Ok(Q::parse_response(&mut data))
    }

    /// Queries server info, measuring the delay from the first request to the decoded answer.
    pub async fn try_query_info(&self, addr: &ServerAddress) -> Result<SourceServerInfo, QueryError> {
        let started = Instant::now();
        let mut info = self.try_query::<InfoQuery>(addr).await?;
        info.delay = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
        Ok(info)
    }

    pub async fn try_query_players(
        &self,
        addr: &ServerAddress,
    ) -> Result<SourceServerPlayers, QueryError> {
        self.try_query::<PlayerQuery>(addr).await
    }

    pub async fn try_query_rules(
        &self,
        addr: &ServerAddress,
    ) -> Result<SourceServerRules, QueryError> {
        self.try_query::<RulesQuery>(addr).await
    }

    pub async fn query_server_info(&self, address: &str) -> SourceServerInfo {
        let addr = ServerAddress::parse(address);
        or_placeholder(InfoQuery::NAME, &addr, self.try_query_info(&addr)).await
    }

    pub async fn query_server_players(&self, address: &str) -> SourceServerPlayers {
        let addr = ServerAddress::parse(address);
        or_placeholder(PlayerQuery::NAME, &addr, self.try_query_players(&addr)).await
    }

    pub async fn query_server_rules(&self, address: &str) -> SourceServerRules {
        let addr = ServerAddress::parse(address);
        or_placeholder(RulesQuery::NAME, &addr, self.try_query_rules(&addr)).await
    }
}

/// Swallows a query error into the placeholder result.
async fn or_placeholder<O, Fut>(kind: &str, addr: &ServerAddress, query: Fut) -> O
where
    O: Default,
    Fut: Future<Output = Result<O, QueryError>>,
{
    query.await.unwrap_or_else(|e| {
        debug!("{} query to {} failed: {}", kind, addr, e);
        O::default()
    })
}

/// It can be used to spawn multiple clients sharing one DNS resolver.
#[derive(Clone)]
pub struct A2sClientBuilder {
    dns_resolver: Option<Resolver>,
    timeout: Duration,
}

impl Default for A2sClientBuilder {
    fn default() -> Self {
        Self {
            dns_resolver: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl A2sClientBuilder {
    pub fn with_dns_resolver(mut self, resolver: Resolver) -> Self {
        self.dns_resolver = Some(resolver);
        self
    }

    /// Timeout applied to each datagram round-trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(&self) -> errors::Result<A2sClient<UdpTransport>> {
        let resolver = match &self.dns_resolver {
            Some(resolver) => Arc::clone(resolver),
            None => dns::default_resolver()?,
        };

        Ok(A2sClient::with_transport(UdpTransport::new(
            resolver,
            self.timeout,
        )))
    }
}

async fn with_default_client<F, Fut, O>(f: F) -> O
where
    F: FnOnce(A2sClient) -> Fut,
    Fut: Future<Output = O>,
    O: Default,
{
    match A2sClientBuilder::default().build() {
        Ok(client) => f(client).await,
        Err(e) => {
            debug!("Failed to set up A2S client: {}", e);
            O::default()
        }
    }
}

pub async fn query_server_info(address: &str) -> SourceServerInfo {
    with_default_client(|client| async move { client.query_server_info(address).await }).await
}

pub async fn query_server_players(address: &str) -> SourceServerPlayers {
    with_default_client(|client| async move { client.query_server_players(address).await }).await
}

pub async fn query_server_rules(address: &str) -> SourceServerRules {
    with_default_client(|client| async move { client.query_server_rules(address).await }).await
}
