//! # Hotel Proto Crate
//!
//! Generated gRPC contracts for every downstream capability the
//! orchestrator talks to. Each module corresponds to one `.proto` file
//! under the top-level `proto/` directory:
//!
//! - **search**: nearby-hotel lookup
//! - **profile**: hotel record enrichment and score updates
//! - **recommendation**: snapshot scoring modes
//! - **reservation**: availability checks, booking, cancellation
//! - **user**: account lifecycle, authentication, order history
//! - **admin**: administrator accounts and hotel ownership
//!
//! The messages are the wire contract from the capability tables in the
//! system design; keep them in sync with the mock services used in tests.

pub mod search {
    tonic::include_proto!("search");
}

pub mod profile {
    tonic::include_proto!("profile");
}

pub mod recommendation {
    tonic::include_proto!("recommendation");
}

pub mod reservation {
    tonic::include_proto!("reservation");
}

pub mod user {
    tonic::include_proto!("user");
}

pub mod admin {
    tonic::include_proto!("admin");
}
