use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// An upstream resolver as configured; `host` may be an IP or a hostname.
///
/// Deserializes from either `"host:port"` or `{ host = "...", port = 53 }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "UpstreamRepr")]
pub struct UpstreamTarget {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UpstreamRepr {
    Address(String),
    Table {
        host: String,
        #[serde(default = "default_port")]
        port: u16,
    },
}

impl TryFrom<UpstreamRepr> for UpstreamTarget {
    type Error = String;

    fn try_from(value: UpstreamRepr) -> Result<Self, Self::Error> {
        match value {
            UpstreamRepr::Address(addr) => addr.parse(),
            UpstreamRepr::Table { host, port } => Ok(Self::new(host, port)),
        }
    }
}

impl UpstreamTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The target as a socket address when `host` is an IP literal.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.host
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, self.port))
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Accepts `host`, `host:port`, `ip`, `ip:port` and `[ipv6]:port`.
impl FromStr for UpstreamTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty upstream address".to_string());
        }
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self::new(addr.ip().to_string(), addr.port()));
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::new(ip.to_string(), default_port()));
        }
        match s.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port in upstream address '{}'", s))?;
                if host.is_empty() {
                    return Err(format!("missing host in upstream address '{}'", s));
                }
                Ok(Self::new(host, port))
            }
            None => Ok(Self::new(s, default_port())),
        }
    }
}

fn default_port() -> u16 {
    53
}
