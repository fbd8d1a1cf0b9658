//! Command line glue: parse options, run one fetch, map errors to exit codes.

use std::time::Duration;

use clap::{ArgAction, Parser};
use proxyfetch_client::{ClientConfig, Error, Kind, Response};

use crate::ProxyFetch;

/// Fetch a URL through an authenticated HTTP forward proxy.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Proxy endpoint, `http://host:port` or `https://host:port`
    #[arg(long, env = "PROXYFETCH_PROXY")]
    pub proxy: Option<String>,

    /// Proxy username
    #[arg(long, env = "PROXYFETCH_USER")]
    pub user: Option<String>,

    /// Proxy password
    #[arg(long, env = "PROXYFETCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Destination URL
    #[arg(long, env = "PROXYFETCH_DEST")]
    pub dest: Option<String>,

    /// Skip certificate verification for the proxy and the destination
    #[arg(long, env = "PROXYFETCH_INSECURE")]
    pub insecure: bool,

    /// Overall budget in seconds, 0 to wait indefinitely
    #[arg(long, env = "PROXYFETCH_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Budget in seconds for reaching the proxy
    #[arg(long, env = "PROXYFETCH_CONNECT_TIMEOUT", default_value_t = 10)]
    pub connect_timeout: u64,

    /// User-Agent header value
    #[arg(long, env = "PROXYFETCH_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Extra request header, `Name: value`; repeatable
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Print the response status line and headers before the body
    #[arg(short, long)]
    pub include: bool,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Transport settings for these options.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        let mut config = ClientConfig::default()
            .with_timeout(timeout)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
            .with_insecure(self.insecure);
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        config
    }

    /// Fluent builder for these options.
    ///
    /// # Errors
    ///
    /// Returns a config error for a header that is not `Name: value`.
    pub fn fetcher(&self) -> proxyfetch_client::Result<ProxyFetch> {
        let mut fetch = ProxyFetch::new()
            .config(self.client_config())
            .credentials(self.user.clone(), self.password.clone());
        if let Some(proxy) = &self.proxy {
            fetch = fetch.proxy(proxy.clone());
        }
        for line in &self.headers {
            fetch = fetch.header_line(line)?;
        }
        Ok(fetch)
    }
}

/// Run the fetch described by `args`.
///
/// # Errors
///
/// Returns the first config or transport error.
pub async fn run(args: &Args) -> proxyfetch_client::Result<Response> {
    let prepared = args.fetcher()?.prepare(args.dest.as_deref())?;
    tracing::debug!(proxy = %prepared.proxy, url = %prepared.request.url(), "prepared request");
    prepared.send().await
}

/// Process exit code for a failed fetch.
///
/// A proxy dial that ran out of `connect_timeout` counts as a timeout.
#[must_use]
pub fn exit_code(error: &Error) -> u8 {
    if error.is_timeout() {
        return 8;
    }
    match error.kind() {
        Kind::Config => 2,
        Kind::Dial => 3,
        Kind::ProxyAuth { .. } => 4,
        Kind::Tls => 5,
        Kind::Request => 6,
        Kind::Read => 7,
        Kind::Timeout(_) => 8,
    }
}

/// Status line and headers as printed by `--include`.
#[must_use]
pub fn format_head(response: &Response) -> String {
    let mut head = format!("{:?} {}\r\n", response.version(), response.status());
    for (name, value) in response.headers() {
        head.push_str(name.as_str());
        head.push_str(": ");
        head.push_str(&String::from_utf8_lossy(value.as_bytes()));
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    head
}
