use std::{
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use tracing::trace;
use trust_dns_resolver::{
    config::{ResolverConfig, ResolverOpts},
    TokioAsyncResolver,
};

use crate::{address::ServerAddress, errors::TransportError};

pub type Resolver = Arc<TokioAsyncResolver>;

pub fn default_resolver() -> crate::errors::Result<Resolver> {
    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        ResolverOpts::default(),
    )?))
}

/// Turns a server address into a socket address, preferring IPv4 results.
pub async fn resolve_host(
    resolver: &TokioAsyncResolver,
    addr: &ServerAddress,
) -> Result<SocketAddr, TransportError> {
    if let Ok(ip) = addr.host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, addr.port));
    }

    let lookup = resolver
        .lookup_ip(addr.host.as_str())
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let ips = lookup.iter().collect::<Vec<_>>();
    trace!("Resolved {} to {:?}", addr.host, ips);

    ips.iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| ips.first())
        .map(|&ip| SocketAddr::new(ip, addr.port))
        .ok_or_else(|| {
            TransportError::Network(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Failed to resolve host {}", addr.host),
            ))
        })
}
