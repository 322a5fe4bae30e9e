//! Minimal statement-execution façade over the `scylla` driver.
//!
//! Provides connection management, literal and prepared statement execution
//! (synchronous and asynchronous), typed result rows, and a fixed-width
//! tabular formatter. Compatible with both Apache Cassandra and ScyllaDB.
//!
//! Cluster discovery, connection pooling, retry policies, and the binary
//! protocol all belong to the driver; this crate only shapes them into a
//! small session API.
//!
//! # Features
//!
//! - `config` - Loading [`ClusterConfig`] from environment variables via
//!   `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use cql_client::{ClusterConfig, CqlValue, Session, format_rows};
//!
//! let config = ClusterConfig::new(vec!["127.0.0.1:9042"]);
//! let session = Session::connect(&config).await?;
//!
//! // Literal statement
//! let result = session.execute("SELECT * FROM simplex.songs").await?;
//! println!("{}", format_rows(&result, &["title", "album", "artist"]));
//!
//! // Prepared statement, bound per execution
//! let insert = session
//!     .prepare("INSERT INTO simplex.songs (id, title) VALUES (?, ?)")
//!     .await?;
//! session
//!     .execute(insert.bind(vec![
//!         CqlValue::Uuid(id),
//!         CqlValue::Text("La Petite Tonkinoise".to_string()),
//!     ])?)
//!     .await?;
//!
//! // Asynchronous submission
//! let pending = session.execute_async("SELECT * FROM simplex.songs");
//! let result = pending.wait().await?;
//!
//! session.close();
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod rows;
pub mod session;
pub mod statement;

pub use config::ClusterConfig;
pub use error::CassandraError;
pub use format::{format_rows, render_value};
pub use rows::{ResultSet, Row};
pub use session::{PendingQuery, Session};
pub use statement::{BoundStatement, PreparedStatement, Statement};

// Re-export scylla types for convenience
pub use scylla::serialize::value::SerializeValue;
pub use scylla::value::CqlValue;
