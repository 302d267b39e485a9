//! Project scaffolding generator and HTTP service skeleton.
//!
//! # Architecture Overview
//!
//! ```text
//!   scaffold --project <dir> --repo <path>
//!       │
//!       ▼
//!   ┌───────────┐   fixed element set    ┌──────────────────────────┐
//!   │ generator │ ─────────────────────▶ │ README / Makefile / src… │
//!   └───────────┘  (name + repo path     └──────────────────────────┘
//!                   substituted)
//!
//!   Generated services are built on the skeleton modules shipped here:
//!
//!   ┌────────┐  ┌────────┐  ┌─────────┐  ┌────────┐  ┌──────────┐
//!   │ config │  │ logger │  │ metrics │  │ router │  │  server  │
//!   │ loader │  │factory │  │registry │  │+ debug │  │ graceful │
//!   └────────┘  └────────┘  └─────────┘  └────────┘  └──────────┘
//! ```

// Scaffolding
pub mod generator;

// Service skeleton
pub mod config;
pub mod handlers;
pub mod logger;
pub mod metrics;
pub mod router;
pub mod server;

pub use config::ServiceConfig;
pub use logger::Logger;
pub use server::{Server, Shutdown};
