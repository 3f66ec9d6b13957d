//! Network infrastructure — implements `NetworkProbe` and `IndexProbe`
//! using `spawn_blocking`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{IndexProbe, NetworkProbe};

/// Production implementation that performs real network checks.
pub struct TokioNetworkProbe;

impl NetworkProbe for TokioNetworkProbe {
    async fn check_tcp_connectivity(&self, host: &str, port: u16) -> Result<bool> {
        let addr = format!("{host}:{port}");
        let result = tokio::task::spawn_blocking(move || {
            let addr: std::net::SocketAddr = addr
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid address {addr}: {e}"))?;
            Ok::<bool, anyhow::Error>(
                std::net::TcpStream::connect_timeout(&addr, Duration::from_secs(3)).is_ok(),
            )
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))??;
        Ok(result)
    }

    async fn check_dns_resolution(&self, hostname: &str) -> Result<bool> {
        let addr = format!("{hostname}:443");
        let result = tokio::task::spawn_blocking(move || {
            use std::net::ToSocketAddrs;
            Ok::<bool, anyhow::Error>(addr.to_socket_addrs().is_ok())
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))??;
        Ok(result)
    }
}

/// Probes the package index with a HEAD request.
pub struct UreqIndexProbe;

impl IndexProbe for UreqIndexProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let agent = ureq::builder().timeout(Duration::from_secs(5)).build();
            match agent.head(&url).call() {
                Ok(_) => true,
                // Any HTTP answer means the index is there; only transport
                // failures count as unreachable.
                Err(ureq::Error::Status(_, _)) => true,
                Err(_) => false,
            }
        })
        .await
        .unwrap_or(false)
    }
}
