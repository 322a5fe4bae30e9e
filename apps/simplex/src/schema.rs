use cql_client::{CassandraError, Session};
use tracing::info;

pub const KEYSPACE: &str = "simplex";

/// The walkthrough targets a local single-node cluster
const REPLICATION_FACTOR: u32 = 1;

/// Create the `simplex` keyspace and its two tables.
///
/// `IF NOT EXISTS` keeps the walkthrough re-runnable after an aborted run;
/// the keyspace is dropped again at the end either way.
pub async fn create_schema(session: &Session) -> Result<(), CassandraError> {
    session
        .execute(format!(
            "CREATE KEYSPACE IF NOT EXISTS {KEYSPACE} WITH replication \
             = {{'class':'SimpleStrategy', 'replication_factor':{REPLICATION_FACTOR}}}"
        ))
        .await?;

    session
        .execute(format!(
            "CREATE TABLE IF NOT EXISTS {KEYSPACE}.songs (\
                 id uuid PRIMARY KEY,\
                 title text,\
                 album text,\
                 artist text,\
                 tags set<text>,\
                 data blob\
             )"
        ))
        .await?;

    session
        .execute(format!(
            "CREATE TABLE IF NOT EXISTS {KEYSPACE}.playlists (\
                 id uuid,\
                 title text,\
                 album text,\
                 artist text,\
                 song_id uuid,\
                 PRIMARY KEY (id, title, album, artist)\
             )"
        ))
        .await?;

    info!("{KEYSPACE} keyspace and schema created");
    Ok(())
}

pub async fn drop_keyspace(session: &Session, keyspace: &str) -> Result<(), CassandraError> {
    session.execute(format!("DROP KEYSPACE {keyspace}")).await?;
    info!("Dropped keyspace {keyspace}");
    Ok(())
}
