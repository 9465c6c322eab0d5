pub mod correlation;
pub mod load_balancer;
pub mod server;
pub mod transport;

pub use correlation::LruCorrelationStore;
pub use load_balancer::{RoundRobinRelay, RoundRobinSelector};
pub use server::{DnsListener, ListenerHandle};
pub use transport::{DnsTransport, TransportResponse, UdpTransport};
