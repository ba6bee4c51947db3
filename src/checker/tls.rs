// src/checker/tls.rs
// =============================================================================
// Certificate check: does the server on port 443 present a certificate that
// is trusted AND valid for the URL's hostname?
//
// We open our own TLS connection (separate from the HTTP request) with full
// verification switched on. rustls checks the chain against the Mozilla
// root store and matches the leaf certificate against the hostname during
// the handshake, so a completed handshake with a leaf certificate is a pass.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore, ServerName};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;
use url::{Host, Url};

// The standard HTTPS port
const HTTPS_PORT: u16 = 443;

// A reusable TLS verification setup
//
// Holds the rustls client configuration (trusted roots) and the port to
// dial. Cloning only bumps a reference count.
#[derive(Clone)]
pub struct TlsProbe {
    config: Arc<ClientConfig>,
    port: u16,
}

impl TlsProbe {
    pub fn new(config: Arc<ClientConfig>, port: u16) -> Self {
        TlsProbe { config, port }
    }

    // Returns true if the handshake and hostname verification succeed
    //
    // Every failure (bad URL, DNS, refused, handshake, wrong hostname,
    // timeout) is logged and turned into `false`.
    pub async fn verify(&self, url: &str, timeout: Duration) -> bool {
        let host = match extract_host(url) {
            Some(host) => host,
            None => {
                debug!(url, "no hostname to verify");
                return false;
            }
        };

        match tokio::time::timeout(timeout, self.handshake(&host)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!(url, host = %host, error = %format!("{:#}", e), "certificate check failed");
                false
            }
            Err(_) => {
                debug!(url, host = %host, "certificate check timed out");
                false
            }
        }
    }

    async fn handshake(&self, host: &str) -> Result<()> {
        let server_name = ServerName::try_from(host)
            .map_err(|e| anyhow!("invalid server name '{}': {}", host, e))?;

        let stream = TcpStream::connect((host, self.port))
            .await
            .with_context(|| format!("could not connect to {}:{}", host, self.port))?;

        let connector = TlsConnector::from(Arc::clone(&self.config));
        let tls = connector
            .connect(server_name, stream)
            .await
            .context("TLS handshake failed")?;

        let (_, session) = tls.get_ref();
        match session.peer_certificates() {
            Some(chain) if !chain.is_empty() => Ok(()),
            _ => Err(anyhow!("server presented no certificate")),
        }
    }
}

impl Default for TlsProbe {
    // Mozilla roots, port 443
    fn default() -> Self {
        TlsProbe::new(Arc::new(webpki_client_config()), HTTPS_PORT)
    }
}

impl fmt::Debug for TlsProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsProbe").field("port", &self.port).finish()
    }
}

// Builds a client configuration that trusts the Mozilla root store
fn webpki_client_config() -> ClientConfig {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            ta.subject,
            ta.spki,
            ta.name_constraints,
        )
    }));

    ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth()
}

// Pulls the hostname out of a URL
//
// Accepts full URLs ("https://example.com:8443/path") as well as bare
// hostnames ("example.com"). Scheme, port, path and credentials are dropped.
// IPv6 literals come back without brackets.
fn extract_host(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", url)).ok()?
        }
        Err(_) => return None,
    };

    match parsed.host()? {
        Host::Domain(domain) if !domain.is_empty() => Some(domain.to_string()),
        Host::Domain(_) => None,
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}
