#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Cassandra/ScyllaDB cluster configuration
///
/// Holds the connection settings for [`Session::connect`](crate::Session::connect).
/// It can be constructed manually or loaded from environment variables (with
/// the `config` feature).
///
/// # Example
///
/// ```ignore
/// use cql_client::ClusterConfig;
///
/// // Manual construction
/// let config = ClusterConfig::new(vec!["127.0.0.1:9042"]);
///
/// // With keyspace
/// let config = ClusterConfig::with_keyspace(vec!["127.0.0.1:9042"], "simplex");
///
/// // From environment variables (requires `config` feature)
/// let config = ClusterConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct ClusterConfig {
    /// Contact points (host:port pairs)
    /// Example: ["127.0.0.1:9042", "127.0.0.2:9042"]
    pub contact_points: Vec<String>,

    /// Keyspace to use (similar to a database in SQL)
    pub keyspace: Option<String>,

    /// Optional username for authentication
    pub username: Option<String>,

    /// Optional password for authentication
    pub password: Option<String>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Per-statement request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ClusterConfig {
    /// Create a new ClusterConfig with contact points
    ///
    /// # Arguments
    /// * `contact_points` - List of Cassandra nodes (e.g., ["127.0.0.1:9042"])
    pub fn new<S: Into<String>>(contact_points: Vec<S>) -> Self {
        Self {
            contact_points: contact_points.into_iter().map(|s| s.into()).collect(),
            keyspace: None,
            username: None,
            password: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }

    /// Create a ClusterConfig with a default keyspace
    ///
    /// # Example
    /// ```ignore
    /// let config = ClusterConfig::with_keyspace(
    ///     vec!["127.0.0.1:9042"],
    ///     "simplex"
    /// );
    /// ```
    pub fn with_keyspace<S: Into<String>>(
        contact_points: Vec<S>,
        keyspace: impl Into<String>,
    ) -> Self {
        let mut config = Self::new(contact_points);
        config.keyspace = Some(keyspace.into());
        config
    }

    /// Set authentication credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Set per-statement request timeout
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Get the contact points
    pub fn contact_points(&self) -> &[String] {
        &self.contact_points
    }

    /// Get the keyspace
    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(vec!["127.0.0.1:9042"])
    }
}

/// Load ClusterConfig from environment variables
///
/// Environment variables:
/// - `CASSANDRA_CONTACT_POINTS` (required) - Comma-separated list of contact points
///   Example: "127.0.0.1:9042,127.0.0.2:9042"
/// - `CASSANDRA_KEYSPACE` (optional) - Default keyspace
/// - `CASSANDRA_USERNAME` (optional) - Authentication username
/// - `CASSANDRA_PASSWORD` (optional) - Authentication password
/// - `CASSANDRA_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `CASSANDRA_REQUEST_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for ClusterConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let contact_points_str = core_config::env_required("CASSANDRA_CONTACT_POINTS")?;

        let contact_points: Vec<String> = contact_points_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if contact_points.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CASSANDRA_CONTACT_POINTS".to_string(),
                details: "No valid contact points provided".to_string(),
            });
        }

        let keyspace = std::env::var("CASSANDRA_KEYSPACE").ok();
        let username = std::env::var("CASSANDRA_USERNAME").ok();
        let password = std::env::var("CASSANDRA_PASSWORD").ok();

        let connect_timeout_secs = core_config::env_or_default("CASSANDRA_CONNECT_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "CASSANDRA_CONNECT_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            })?;

        let request_timeout_secs = core_config::env_or_default("CASSANDRA_REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "CASSANDRA_REQUEST_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            contact_points,
            keyspace,
            username,
            password,
            connect_timeout_secs,
            request_timeout_secs,
        })
    }
}
