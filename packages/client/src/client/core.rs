//! Proxy-aware transport
//!
//! Each call to [`ProxyTransport::send`] dials the proxy, optionally tunnels
//! with CONNECT and TLS, exchanges one request and drains the response. The
//! phases run in order on the calling task; nothing is pooled or retried.

use std::time::Instant;

use bytes::Bytes;
use http_body_util::Empty;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;

use crate::config::{ClientConfig, Validator};
use crate::connect::{self, BoxedIo};
use crate::error::{self, Phase, Result};
use crate::http::{OutboundRequest, PhaseTimings, Response};
use crate::proxy::ProxyTarget;
use crate::tls::TlsManager;

/// Routes requests through a forward proxy.
///
/// Holds configuration and the TLS connector only; no connection or other
/// state carries over between requests.
#[derive(Debug, Clone)]
pub struct ProxyTransport {
    config: ClientConfig,
    tls: TlsManager,
}

impl ProxyTransport {
    /// # Errors
    ///
    /// Returns a config error if `config` fails validation, or a TLS error
    /// if the TLS connector cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate().map_err(error::config)?;
        let tls = TlsManager::new(&config)?;
        Ok(Self { config, tls })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` through `proxy` and collect the full response.
    ///
    /// `https` destinations are reached through a CONNECT tunnel carrying the
    /// request's headers; `http` destinations are forwarded in absolute form.
    ///
    /// # Errors
    ///
    /// Returns the error of the first phase that fails, or a timeout error
    /// naming the phase in flight when the configured budget ran out.
    pub async fn send(&self, request: OutboundRequest, proxy: &ProxyTarget) -> Result<Response> {
        let url = request.url().clone();
        let mut phase = Phase::Dial;

        let result = match self.config.timeout {
            Some(budget) => {
                let outcome =
                    tokio::time::timeout(budget, self.run(request, proxy, &mut phase)).await;
                match outcome {
                    Ok(result) => result,
                    Err(_elapsed) => {
                        tracing::debug!("Request budget of {:?} exhausted during {}", budget, phase);
                        Err(error::timeout(phase))
                    }
                }
            }
            None => self.run(request, proxy, &mut phase).await,
        };

        result.map_err(|e| e.with_url(url))
    }

    async fn run(
        &self,
        request: OutboundRequest,
        proxy: &ProxyTarget,
        phase: &mut Phase,
    ) -> Result<Response> {
        let mut timings = PhaseTimings::default();

        *phase = Phase::Dial;
        let started = Instant::now();
        let tcp = connect::dial(proxy, self.config.connect_timeout).await?;
        let mut io: BoxedIo = Box::new(tcp);
        if proxy.scheme().is_tls() {
            let tls = self
                .tls
                .handshake(io, proxy.host())
                .await
                .map_err(error::dial)?;
            io = Box::new(tls);
        }
        timings.dial = started.elapsed();

        let http_request = if request.is_tunneled() {
            *phase = Phase::Connect;
            let started = Instant::now();
            let authority = request.connect_authority()?;
            connect::establish_tunnel(&mut io, &authority, request.headers()).await?;
            timings.connect = Some(started.elapsed());

            *phase = Phase::Tls;
            let started = Instant::now();
            io = Box::new(self.tls.handshake(io, &request.tls_host()?).await?);
            timings.tls = Some(started.elapsed());

            request.to_tunneled_request()?
        } else {
            request.to_forward_request()?
        };

        *phase = Phase::Exchange;
        let started = Instant::now();
        let mut response = exchange(io, http_request).await?;
        timings.exchange = started.elapsed();

        tracing::debug!(
            status = response.status_code(),
            total_ms = timings.total().as_millis(),
            "request complete"
        );
        response.set_timings(timings);
        Ok(response)
    }
}

/// Write `request` over `io` as HTTP/1.1 and drain the response.
///
/// The connection is torn down once the body has been read or the exchange
/// failed.
async fn exchange(io: BoxedIo, request: http::Request<Empty<Bytes>>) -> Result<Response> {
    let mut builder = http1::Builder::new();
    builder.title_case_headers(true);
    let (mut sender, connection) = builder
        .handshake(TokioIo::new(io))
        .await
        .map_err(error::request)?;

    let driver = tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!("Connection closed with error: {}", e);
        }
    });

    let outcome = async {
        let response = sender.send_request(request).await.map_err(error::request)?;
        Response::collect(response).await
    }
    .await;

    driver.abort();
    outcome
}
