use std::sync::{Arc, RwLock};
use std::time::Duration;

use scylla::client::session::Session as DriverSession;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::Statement as DriverStatement;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::ClusterConfig;
use crate::error::CassandraError;
use crate::rows::ResultSet;
use crate::statement::{PreparedStatement, Statement};

/// A connected client context against a Cassandra/ScyllaDB cluster.
///
/// Created by [`Session::connect`], released by [`Session::close`] (or drop).
/// Once closed, every statement operation fails with
/// [`CassandraError::Closed`]; a session never reconnects.
///
/// # Example
///
/// ```ignore
/// use cql_client::{ClusterConfig, Session};
///
/// let config = ClusterConfig::new(vec!["127.0.0.1:9042"]);
/// let session = Session::connect(&config).await?;
/// let result = session.execute("SELECT * FROM simplex.songs").await?;
/// session.close();
/// ```
pub struct Session {
    driver: RwLock<Option<Arc<DriverSession>>>,
    cluster_name: Option<String>,
    request_timeout: Duration,
}

/// Handle to an in-flight asynchronous query.
///
/// The query runs on a spawned tokio task; [`wait`](PendingQuery::wait)
/// consumes the handle and resolves to exactly one of success or failure.
/// There is no cancellation API; dropping the handle lets the query run to
/// completion unobserved.
pub struct PendingQuery {
    handle: JoinHandle<Result<ResultSet, CassandraError>>,
}

impl PendingQuery {
    /// Resolve the query outcome. Consumes the handle, so the completion is
    /// observed at most once.
    pub async fn wait(self) -> Result<ResultSet, CassandraError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => Err(CassandraError::Protocol(format!(
                "async query task failed: {join_error}"
            ))),
        }
    }
}

impl Session {
    /// Open a session against the configured contact points.
    ///
    /// Verifies the connection with a `system.local` probe and logs the
    /// resolved cluster name. Fails with [`CassandraError::Connection`] when
    /// no endpoint is reachable.
    pub async fn connect(config: &ClusterConfig) -> Result<Self, CassandraError> {
        info!(
            "Attempting to connect to Cassandra at {:?}",
            config.contact_points
        );

        let points: Vec<&str> = config.contact_points.iter().map(|s| s.as_str()).collect();

        let mut builder = SessionBuilder::new()
            .known_nodes(&points)
            .connection_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.user(username, password);
        }

        if let Some(ref keyspace) = config.keyspace {
            builder = builder.use_keyspace(keyspace, true);
        }

        let driver: DriverSession = builder.build().await?;

        // Verify the connection and resolve the cluster name
        let probe = driver
            .query_unpaged("SELECT cluster_name FROM system.local", &[])
            .await
            .map_err(|e| CassandraError::Connection(e.to_string()))?;
        let cluster_name = probe
            .into_rows_result()
            .ok()
            .and_then(|rows| rows.first_row::<(Option<String>,)>().ok())
            .and_then(|(name,)| name);

        match &cluster_name {
            Some(name) => info!(cluster = %name, "Connected to cluster"),
            None => info!("Connected to cluster"),
        }

        Ok(Self {
            driver: RwLock::new(Some(Arc::new(driver))),
            cluster_name,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// Cluster name resolved at connect time
    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref()
    }

    /// Execute a statement and await the round trip.
    ///
    /// Accepts literal CQL (`&str`/`String`) or a
    /// [`BoundStatement`](crate::BoundStatement) produced by
    /// [`PreparedStatement::bind`].
    pub async fn execute(
        &self,
        statement: impl Into<Statement>,
    ) -> Result<ResultSet, CassandraError> {
        let driver = self.driver()?;
        Self::run(driver, statement.into(), self.request_timeout).await
    }

    /// Compile a parameterized template once for repeated binding.
    ///
    /// The configured request timeout is attached to the compiled statement,
    /// so every later execution inherits it.
    pub async fn prepare(&self, template: &str) -> Result<PreparedStatement, CassandraError> {
        let driver = self.driver()?;
        debug!(template, "Preparing statement");
        let mut prepared = driver.prepare(template).await?;
        prepared.set_request_timeout(Some(self.request_timeout));
        Ok(PreparedStatement::new(prepared))
    }

    /// Submit a statement without awaiting it.
    ///
    /// Returns immediately; the query completes on a driver/runtime-managed
    /// task, with no ordering guarantee relative to other concurrent
    /// submissions. A closed session still yields a handle, which resolves to
    /// [`CassandraError::Closed`].
    pub fn execute_async(&self, statement: impl Into<Statement>) -> PendingQuery {
        let driver = self.driver();
        let statement = statement.into();
        let request_timeout = self.request_timeout;
        let handle = tokio::spawn(async move {
            let driver = driver?;
            Self::run(driver, statement, request_timeout).await
        });
        PendingQuery { handle }
    }

    async fn run(
        driver: Arc<DriverSession>,
        statement: Statement,
        request_timeout: Duration,
    ) -> Result<ResultSet, CassandraError> {
        let result = match statement {
            Statement::Literal(cql) => {
                debug!(%cql, "Executing statement");
                let mut statement = DriverStatement::new(cql);
                statement.set_request_timeout(Some(request_timeout));
                driver.query_unpaged(statement, &[]).await?
            }
            Statement::Bound(bound) => {
                debug!(
                    cql = bound.prepared.get_statement(),
                    values = bound.values.len(),
                    "Executing bound statement"
                );
                driver.execute_unpaged(&bound.prepared, &bound.values).await?
            }
        };
        ResultSet::from_query_result(result)
    }

    /// Shut down the pooled connections. Idempotent; in-flight asynchronous
    /// queries keep the driver session alive until they finish.
    pub fn close(&self) {
        let released = self
            .driver
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if released.is_some() {
            info!("Session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.driver
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }

    fn driver(&self) -> Result<Arc<DriverSession>, CassandraError> {
        self.driver
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(CassandraError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scylla::value::CqlValue;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn local_config() -> ClusterConfig {
        let contact_points = std::env::var("CASSANDRA_CONTACT_POINTS")
            .unwrap_or_else(|_| "127.0.0.1:9042".to_string());
        ClusterConfig::new(contact_points.split(',').collect())
    }

    fn tag_set(row: &crate::Row) -> BTreeSet<String> {
        match row.get("tags") {
            Some(CqlValue::Set(items)) => items
                .iter()
                .filter_map(|v| match v {
                    CqlValue::Text(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn test_connect_unreachable_endpoint() {
        // Port 9 (discard) is never a Cassandra endpoint
        let config = ClusterConfig::new(vec!["127.0.0.1:9"]).with_connect_timeout(2);
        let result = Session::connect(&config).await;
        assert!(matches!(result, Err(CassandraError::Connection(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual Cassandra
    async fn test_connect_resolves_cluster_name() {
        let session = Session::connect(&local_config()).await.unwrap();
        assert!(session.cluster_name().is_some());
        session.close();
    }

    #[tokio::test]
    #[ignore] // Requires actual Cassandra
    async fn test_execute_after_close_fails() {
        let session = Session::connect(&local_config()).await.unwrap();
        session.close();
        session.close(); // idempotent
        assert!(session.is_closed());

        let result = session.execute("SELECT cluster_name FROM system.local").await;
        assert!(matches!(result, Err(CassandraError::Closed)));

        let pending = session.execute_async("SELECT cluster_name FROM system.local");
        assert!(matches!(pending.wait().await, Err(CassandraError::Closed)));
    }

    #[tokio::test]
    #[ignore] // Requires actual Cassandra
    async fn test_prepare_and_bind_arity_mismatch() {
        let session = Session::connect(&local_config()).await.unwrap();
        session
            .execute(
                "CREATE KEYSPACE IF NOT EXISTS cql_client_test WITH replication \
                 = {'class':'SimpleStrategy', 'replication_factor':1}",
            )
            .await
            .unwrap();
        session
            .execute(
                "CREATE TABLE IF NOT EXISTS cql_client_test.pairs \
                 (id uuid PRIMARY KEY, label text)",
            )
            .await
            .unwrap();

        let insert = session
            .prepare("INSERT INTO cql_client_test.pairs (id, label) VALUES (?, ?)")
            .await
            .unwrap();
        assert_eq!(insert.parameter_count(), 2);

        let short = insert.bind(vec![CqlValue::Uuid(Uuid::new_v4())]);
        assert!(matches!(
            short,
            Err(CassandraError::Argument {
                expected: 2,
                actual: 1
            })
        ));

        session.execute("DROP KEYSPACE cql_client_test").await.unwrap();
        session.close();
    }

    #[tokio::test]
    #[ignore] // Requires actual Cassandra
    async fn test_unknown_table_is_schema_error() {
        let session = Session::connect(&local_config()).await.unwrap();
        let result = session
            .execute("SELECT * FROM no_such_keyspace.no_such_table")
            .await;
        assert!(matches!(result, Err(CassandraError::Schema(_))));
        session.close();
    }

    // The song scenario: insert, select, update a set column, select again.
    #[tokio::test]
    #[ignore] // Requires actual Cassandra
    async fn test_song_insert_select_update_scenario() {
        let session = Session::connect(&local_config()).await.unwrap();
        session
            .execute(
                "CREATE KEYSPACE IF NOT EXISTS cql_client_scenario WITH replication \
                 = {'class':'SimpleStrategy', 'replication_factor':1}",
            )
            .await
            .unwrap();
        session
            .execute(
                "CREATE TABLE IF NOT EXISTS cql_client_scenario.songs (\
                 id uuid PRIMARY KEY, title text, album text, artist text, \
                 tags set<text>, data blob)",
            )
            .await
            .unwrap();

        let id = Uuid::parse_str("756716f7-2e54-4715-9f00-91dcbea6cf50").unwrap();
        let insert = session
            .prepare(
                "INSERT INTO cql_client_scenario.songs (id, title, album, artist, tags) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .await
            .unwrap();
        let bound = insert
            .bind(vec![
                CqlValue::Uuid(id),
                CqlValue::Text("La Petite Tonkinoise".to_string()),
                CqlValue::Text("Bye Bye Blackbird".to_string()),
                CqlValue::Text("Joséphine Baker".to_string()),
                CqlValue::Set(vec![
                    CqlValue::Text("jazz".to_string()),
                    CqlValue::Text("2013".to_string()),
                ]),
            ])
            .unwrap();
        session.execute(bound).await.unwrap();

        let result = session
            .execute(format!(
                "SELECT * FROM cql_client_scenario.songs WHERE id = {id}"
            ))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        let row = &result.rows()[0];
        assert_eq!(
            row.get("title"),
            Some(&CqlValue::Text("La Petite Tonkinoise".to_string()))
        );
        assert_eq!(
            tag_set(row),
            BTreeSet::from(["jazz".to_string(), "2013".to_string()])
        );

        session
            .execute(format!(
                "UPDATE cql_client_scenario.songs \
                 SET tags = tags + {{ 'entre-deux-guerres' }} WHERE id = {id}"
            ))
            .await
            .unwrap();

        let result = session
            .execute(format!(
                "SELECT * FROM cql_client_scenario.songs WHERE id = {id}"
            ))
            .await
            .unwrap();
        assert_eq!(
            tag_set(&result.rows()[0]),
            BTreeSet::from([
                "jazz".to_string(),
                "2013".to_string(),
                "entre-deux-guerres".to_string()
            ])
        );

        session
            .execute("DROP KEYSPACE cql_client_scenario")
            .await
            .unwrap();
        session.close();
    }

    #[tokio::test]
    #[ignore] // Requires actual Cassandra
    async fn test_pending_query_resolves_exactly_once() {
        let session = Session::connect(&local_config()).await.unwrap();
        let pending = session.execute_async("SELECT cluster_name FROM system.local");
        // wait() consumes the handle, so a second observation cannot compile;
        // the single outcome must be a success here.
        let result = pending.wait().await.unwrap();
        assert_eq!(result.len(), 1);
        session.close();
    }
}
