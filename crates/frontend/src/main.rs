//! Single-process frontend binary.
//!
//! Wires a local registry, the in-process recommendation service over a
//! demo snapshot, and the HTTP frontend. Backend services running
//! elsewhere are announced with repeated `--backend name=host:port`
//! flags, e.g. `--backend srv-user=10.0.0.5:9001`.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hotel_dispatcher::Dispatcher;
use hotel_frontend::{http, FrontendServer};
use hotel_recommendation::{FixedSource, Hotel, RecommendationEngine};
use hotel_registry::{LocalRegistry, Registry};

/// Hotel reservation frontend
#[derive(Parser)]
#[command(name = "hotel-frontend")]
#[command(about = "HTTP frontend orchestrating the hotel reservation services", long_about = None)]
struct Cli {
    /// HTTP port to serve on
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Address the in-process recommendation service binds and registers
    #[arg(long, default_value = "127.0.0.1")]
    address: String,

    /// Port of the in-process recommendation service
    #[arg(long, default_value = "8083")]
    recommendation_port: u16,

    /// Externally running backend, as name=host:port (repeatable)
    #[arg(long = "backend")]
    backends: Vec<Backend>,
}

/// One externally announced backend endpoint.
#[derive(Debug, Clone)]
struct Backend {
    name: String,
    host: String,
    port: u16,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, addr) = s
            .split_once('=')
            .ok_or_else(|| format!("expected name=host:port, got {:?}", s))?;
        let (host, port) = addr
            .split_once(':')
            .ok_or_else(|| format!("expected name=host:port, got {:?}", s))?;
        let port = port
            .parse()
            .map_err(|_| format!("invalid port in {:?}", s))?;
        Ok(Backend {
            name: name.to_string(),
            host: host.to_string(),
            port,
        })
    }
}

/// Demo snapshot served when no external recommendation data is wired in.
fn demo_hotels() -> Vec<Hotel> {
    vec![
        Hotel { id: "1".into(), lat: 37.7867, lon: -122.4112, rate: 4.3, price: 189.0 },
        Hotel { id: "2".into(), lat: 37.7854, lon: -122.4005, rate: 4.1, price: 152.0 },
        Hotel { id: "3".into(), lat: 37.7834, lon: -122.4071, rate: 4.7, price: 238.0 },
        Hotel { id: "4".into(), lat: 37.7936, lon: -122.3930, rate: 3.8, price: 109.0 },
        Hotel { id: "5".into(), lat: 37.7831, lon: -122.4181, rate: 4.7, price: 300.0 },
        Hotel { id: "6".into(), lat: 37.7863, lon: -122.4015, rate: 4.6, price: 149.0 },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let registry = Arc::new(LocalRegistry::new());
    for backend in &cli.backends {
        registry
            .register(&backend.name, &backend.host, backend.port)
            .await?;
        info!("announced backend {} at {}:{}", backend.name, backend.host, backend.port);
    }

    let engine = Arc::new(
        RecommendationEngine::new(Arc::new(FixedSource::new(demo_hotels()))).await?,
    );

    let registry_dyn: Arc<dyn Registry> = registry.clone();
    let dispatcher = Arc::new(Dispatcher::new(registry_dyn.clone()));
    let frontend = FrontendServer::new(dispatcher);

    // Both servers run until one fails or the process is stopped.
    tokio::select! {
        result = hotel_recommendation::serve(
            engine,
            registry_dyn,
            &cli.address,
            cli.recommendation_port,
            std::future::pending(),
        ) => result,
        result = http::serve(frontend, cli.port) => result,
    }
}
