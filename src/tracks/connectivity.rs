use std::{future::Future, time::Duration};

use reqwest::Url;
use tokio::{net::TcpStream, time::timeout};

/// Reachability as reported by the platform. `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetState {
    pub is_connected: Option<bool>,
    pub is_internet_reachable: Option<bool>,
}

impl NetState {
    pub fn online() -> Self {
        Self {
            is_connected: Some(true),
            is_internet_reachable: Some(true),
        }
    }

    pub fn offline() -> Self {
        Self {
            is_connected: Some(false),
            is_internet_reachable: Some(false),
        }
    }

    /// Offline only when a signal is explicitly `false`; unknown counts as online.
    pub fn is_offline(&self) -> bool {
        self.is_connected == Some(false) || self.is_internet_reachable == Some(false)
    }
}

pub trait Connectivity {
    fn fetch(&self) -> impl Future<Output = NetState> + Send;
}

impl Connectivity for NetState {
    async fn fetch(&self) -> NetState {
        *self
    }
}

/// Reachability check by opening a TCP connection to the catalog host.
#[derive(Debug, Clone)]
pub struct NetworkProbe {
    addr: Option<String>,
    timeout: Duration,
    forced: Option<NetState>,
}

impl NetworkProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: Some(addr.into()),
            timeout,
            forced: None,
        }
    }

    /// Probes the host and port of `url`. An unparsable URL yields a probe
    /// that reports an unknown state.
    pub fn for_url(url: &str, timeout: Duration) -> Self {
        let addr = Url::parse(url).ok().and_then(|u| {
            let host = u.host_str()?.to_string();
            let port = u.port_or_known_default()?;
            Some(format!("{host}:{port}"))
        });

        Self {
            addr,
            timeout,
            forced: None,
        }
    }

    pub fn forced(state: NetState) -> Self {
        Self {
            addr: None,
            timeout: Duration::ZERO,
            forced: Some(state),
        }
    }
}

impl Connectivity for NetworkProbe {
    async fn fetch(&self) -> NetState {
        if let Some(state) = self.forced {
            return state;
        }

        let Some(addr) = &self.addr else {
            return NetState::default();
        };

        match timeout(self.timeout, TcpStream::connect(addr.as_str())).await {
            Ok(Ok(_)) => NetState::online(),
            Ok(Err(_)) | Err(_) => NetState {
                is_connected: None,
                is_internet_reachable: Some(false),
            },
        }
    }
}
