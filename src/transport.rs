use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use tokio::net::UdpSocket;
use tracing::trace;

use crate::{
    address::ServerAddress,
    dns::{self, Resolver},
    errors::TransportError,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Largest payload a UDP datagram can carry over IPv4.
const MAX_DATAGRAM_SIZE: usize = 65_507;

pub type TransportResult = Result<Bytes, TransportError>;

/// Single request/response datagram exchange.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, addr: &'a ServerAddress, payload: &'a [u8])
        -> BoxFuture<'a, TransportResult>;
}

/// Sends every request from a fresh ephemeral socket and waits for one reply.
#[derive(Clone)]
pub struct UdpTransport {
    resolver: Resolver,
    timeout: Duration,
}

impl fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UdpTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UdpTransport {
    pub fn new(resolver: Resolver, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(&self, target: SocketAddr, payload: &[u8]) -> TransportResult {
        let bind_addr: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(target).await?;

        trace!("Sending data to {}: {}", target, hex::encode(payload));
        socket.send(payload).await?;

        let mut buf = vec![0; MAX_DATAGRAM_SIZE];
        let len = socket.recv(&mut buf).await?;
        buf.truncate(len);
        trace!("Received data from {}: {}", target, hex::encode(&buf));

        Ok(buf.into())
    }
}

impl Transport for UdpTransport {
    fn send<'a>(
        &'a self,
        addr: &'a ServerAddress,
        payload: &'a [u8],
    ) -> BoxFuture<'a, TransportResult> {
        // The timeout covers hostname resolution as well as the datagram exchange.
        let round_trip = async move {
            let target = dns::resolve_host(&self.resolver, addr).await?;
            self.exchange(target, payload).await
        };

        async move {
            match tokio::time::timeout(self.timeout, round_trip).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout(self.timeout)),
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Instant};
    use trust_dns_resolver::{
        config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
        TokioAsyncResolver,
    };

    fn loopback_transport(timeout: Duration) -> UdpTransport {
        UdpTransport::new(dns::default_resolver().unwrap(), timeout)
    }

    #[tokio::test]
    async fn receives_reply() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = server.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut buf = [0; 64];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            let mut reply = b"echo:".to_vec();
            reply.extend_from_slice(&buf[..len]);
            server.send_to(&reply, peer).await.unwrap();
        });

        let transport = loopback_transport(DEFAULT_TIMEOUT);
        let result = transport
            .send(&ServerAddress::new("127.0.0.1", port), b"ping")
            .await
            .unwrap();

        assert_eq!(&result[..], b"echo:ping");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        // Bound but never answers.
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = server.local_addr().unwrap().port();

        let timeout = Duration::from_millis(200);
        let transport = loopback_transport(timeout);
        let started = Instant::now();
        let result = transport
            .send(&ServerAddress::new("127.0.0.1", port), b"ping")
            .await;

        assert!(matches!(result, Err(TransportError::Timeout(t)) if t == timeout));
        assert!(started.elapsed() < timeout + Duration::from_secs(1));
        drop(server);
    }

    #[tokio::test]
    async fn closed_port_is_network_error() {
        let port = {
            let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
            socket.local_addr().unwrap().port()
        };

        let timeout = Duration::from_secs(2);
        let transport = loopback_transport(timeout);
        let started = Instant::now();
        let result = transport
            .send(&ServerAddress::new("127.0.0.1", port), b"ping")
            .await;

        assert!(matches!(result, Err(TransportError::Network(_))), "{result:?}");
        assert!(started.elapsed() < timeout);
    }

    #[tokio::test]
    async fn timeout_covers_hostname_lookup() {
        // Nameserver that swallows every request.
        let nameserver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let ns_addr = nameserver.local_addr().unwrap();

        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ns_addr.ip()], ns_addr.port(), true),
        );
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(2);
        opts.attempts = 1;
        let resolver = Arc::new(TokioAsyncResolver::tokio(config, opts).unwrap());

        let timeout = Duration::from_millis(200);
        let transport = UdpTransport::new(resolver, timeout);
        let started = Instant::now();
        let result = transport
            .send(&ServerAddress::new("play.example.com", 27015), b"ping")
            .await;

        assert!(matches!(result, Err(TransportError::Timeout(t)) if t == timeout));
        assert!(started.elapsed() < timeout + Duration::from_secs(1));
        drop(nameserver);
    }

    #[test]
    fn debug_omits_resolver() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();
        let transport = loopback_transport(Duration::from_millis(1500));

        assert_eq!(
            format!("{:?}", transport),
            "UdpTransport { timeout: 1.5s, .. }"
        );
        assert_eq!(
            format!("{:?}", crate::protocols::a2s::A2sClient::with_transport(transport)),
            "A2sClient { transport: UdpTransport { timeout: 1.5s, .. } }"
        );
    }
}
