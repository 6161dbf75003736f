//! HTTP routing providers backed by OSRM.
//!
//! [`HttpRoutingProvider`] implements both
//! [`wayrank_core::MatrixProvider`] (Table service) and
//! [`wayrank_core::RouteProvider`] (Route service). Neither retries: the
//! first failure is final.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use wayrank_core::{Overview, Point, Profile, RouteProvider, RouteQuery};
//! use wayrank_data::ResponseCache;
//! use wayrank_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
//!
//! let config = HttpRoutingProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(5))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRoutingProvider::with_config(config, ResponseCache::default())?;
//!
//! let from = Point::new("Home", 51.5, -0.1)?;
//! let to = Point::new("Office", 51.6, -0.2)?;
//! let detail = provider.route(&RouteQuery::between(&from, &to, Profile::Foot, Overview::Full))?;
//! println!("{:?}", detail.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_ROUTING_URL, HttpRoutingProvider, HttpRoutingProviderConfig};
