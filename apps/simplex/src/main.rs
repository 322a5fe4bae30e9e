//! Walkthrough of the `cql_client` façade against a local cluster.
//!
//! Creates the `simplex` keyspace and schema, loads the song/playlist data
//! with literal and with prepared statements, queries and updates it, runs
//! one asynchronous query, then drops the keyspace. The session is closed on
//! every exit path.

use core_config::{Environment, FromEnv};
use cql_client::{ClusterConfig, Session};

mod load;
mod report;
mod schema;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    core_config::tracing::install_color_eyre();
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let config = cluster_config()?;
    let session = Session::connect(&config).await?;

    // Close on the failure path too; any error aborts the remaining steps.
    let outcome = run(&session).await;
    session.close();
    outcome
}

async fn run(session: &Session) -> eyre::Result<()> {
    schema::create_schema(session).await?;

    load::load_data(session, load::LoadMode::Literal).await?;
    // The second pass re-inserts the same primary keys, so it only swaps the
    // statement-construction strategy.
    load::load_data(session, load::LoadMode::Prepared).await?;

    report::print_playlist(session).await?;
    report::add_tag_and_report(session).await?;
    report::print_songs_async(session).await?;

    schema::drop_keyspace(session, schema::KEYSPACE).await?;
    Ok(())
}

fn cluster_config() -> eyre::Result<ClusterConfig> {
    if std::env::var("CASSANDRA_CONTACT_POINTS").is_ok() {
        Ok(ClusterConfig::from_env()?)
    } else {
        Ok(ClusterConfig::default())
    }
}
