use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::core::constants::dev_server;
use crate::core::error::{BridgeError, Result};

/// The address a dev server reported once it started listening
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAddress {
    Tcp { host: String, port: u16 },
    /// Unix socket path or named pipe
    Pipe(String),
}

impl ServerAddress {
    /// Interpret a bound-address string such as `127.0.0.1:1420`, `[::1]:5173`,
    /// `localhost:1420` or `/tmp/vite.sock`.
    ///
    /// A bare host or IP without a port gets the default dev server port.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Ok(addr) = input.parse::<SocketAddr>() {
            return addr.into();
        }

        if let Some((host, port)) = input.rsplit_once(':')
            && is_host_name(host)
            && let Ok(port) = port.parse::<u16>()
        {
            return ServerAddress::Tcp {
                host: host.to_string(),
                port,
            };
        }

        if let Ok(ip) = input.parse::<IpAddr>() {
            return SocketAddr::new(ip, dev_server::DEFAULT_PORT).into();
        }

        if is_host_name(input) {
            return ServerAddress::Tcp {
                host: input.to_string(),
                port: dev_server::DEFAULT_PORT,
            };
        }

        ServerAddress::Pipe(input.to_string())
    }

    /// URL the packaging CLI should load in development.
    ///
    /// Loopback hosts are rendered as `localhost`; pipe addresses cannot be
    /// reached over HTTP and are rejected.
    pub fn dev_url(&self, https: bool) -> Result<String> {
        let (host, port) = match self {
            ServerAddress::Tcp { host, port } => (host.as_str(), *port),
            ServerAddress::Pipe(path) => {
                return Err(BridgeError::UnexpectedAddress(path.clone()));
            }
        };

        let scheme = if https { "https" } else { "http" };
        let host = if dev_server::LOOPBACK_ALIASES.contains(&host) {
            dev_server::LOCALHOST.to_string()
        } else if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        Ok(format!("{scheme}://{host}:{port}"))
    }
}

fn is_host_name(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

impl From<SocketAddr> for ServerAddress {
    fn from(addr: SocketAddr) -> Self {
        ServerAddress::Tcp {
            host: addr.ip().to_string(),
            port: addr.port(),
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerAddress::Tcp { host, port } if host.contains(':') => {
                write!(f, "[{host}]:{port}")
            }
            ServerAddress::Tcp { host, port } => write!(f, "{host}:{port}"),
            ServerAddress::Pipe(path) => write!(f, "{path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn tcp(host: &str, port: u16) -> ServerAddress {
        ServerAddress::Tcp {
            host: host.to_string(),
            port,
        }
    }

    #[test]
    fn test_parse__socket_addresses() {
        assert_eq!(ServerAddress::parse("127.0.0.1:1420"), tcp("127.0.0.1", 1420));
        assert_eq!(ServerAddress::parse("[::1]:5173"), tcp("::1", 5173));
        assert_eq!(ServerAddress::parse("0.0.0.0:80"), tcp("0.0.0.0", 80));
    }

    #[test]
    fn test_parse__host_names() {
        assert_eq!(ServerAddress::parse("localhost:1420"), tcp("localhost", 1420));
        assert_eq!(
            ServerAddress::parse(" dev.example.test:8080 "),
            tcp("dev.example.test", 8080)
        );
    }

    #[test]
    fn test_parse__host_without_port_uses_default_port() {
        assert_eq!(ServerAddress::parse("localhost"), tcp("localhost", 1420));
        assert_eq!(ServerAddress::parse("127.0.0.1"), tcp("127.0.0.1", 1420));
        assert_eq!(ServerAddress::parse("::1"), tcp("::1", 1420));
        assert_eq!(
            ServerAddress::parse("localhost").dev_url(false).unwrap(),
            "http://localhost:1420"
        );
    }

    #[test]
    fn test_parse__pipes() {
        assert_eq!(
            ServerAddress::parse("/tmp/vite.sock"),
            ServerAddress::Pipe("/tmp/vite.sock".to_string())
        );
        assert_eq!(
            ServerAddress::parse(r"\\.\pipe\vite"),
            ServerAddress::Pipe(r"\\.\pipe\vite".to_string())
        );
        assert_eq!(
            ServerAddress::parse("localhost:99999"),
            ServerAddress::Pipe("localhost:99999".to_string())
        );
        assert_eq!(
            ServerAddress::parse("localhost:"),
            ServerAddress::Pipe("localhost:".to_string())
        );
        assert_eq!(
            ServerAddress::parse("/run/dev:1420"),
            ServerAddress::Pipe("/run/dev:1420".to_string())
        );
    }

    #[test]
    fn test_dev_url__loopback_aliases_become_localhost() {
        for host in [
            "localhost",
            "127.0.0.1",
            "::1",
            "0000:0000:0000:0000:0000:0000:0000:0001",
        ] {
            assert_eq!(
                tcp(host, 1420).dev_url(false).unwrap(),
                "http://localhost:1420"
            );
        }
    }

    #[test]
    fn test_dev_url__https() {
        assert_eq!(
            tcp("127.0.0.1", 5173).dev_url(true).unwrap(),
            "https://localhost:5173"
        );
    }

    #[test]
    fn test_dev_url__other_hosts_kept() {
        assert_eq!(
            tcp("192.168.1.20", 1420).dev_url(false).unwrap(),
            "http://192.168.1.20:1420"
        );
        assert_eq!(
            tcp("0.0.0.0", 1420).dev_url(false).unwrap(),
            "http://0.0.0.0:1420"
        );
        assert_eq!(
            tcp("fe80::1", 1420).dev_url(false).unwrap(),
            "http://[fe80::1]:1420"
        );
    }

    #[test]
    fn test_dev_url__pipe_is_unexpected() {
        let err = ServerAddress::Pipe("/tmp/vite.sock".to_string())
            .dev_url(false)
            .unwrap_err();

        assert!(matches!(err, BridgeError::UnexpectedAddress(ref a) if a == "/tmp/vite.sock"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_from_socket_addr() {
        let addr: SocketAddr = "[fe80::2]:3000".parse().unwrap();

        assert_eq!(ServerAddress::from(addr), tcp("fe80::2", 3000));
    }

    #[test]
    fn test_display() {
        assert_eq!(tcp("localhost", 1420).to_string(), "localhost:1420");
        assert_eq!(tcp("::1", 1420).to_string(), "[::1]:1420");
        assert_eq!(
            ServerAddress::Pipe("/tmp/x.sock".to_string()).to_string(),
            "/tmp/x.sock"
        );
    }
}
