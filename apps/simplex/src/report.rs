//! Query, update, and print steps of the walkthrough.

use cql_client::{Session, format_rows};
use tracing::{error, info};

use crate::schema::KEYSPACE;

/// Playlist queried in the walkthrough (holds the first two songs)
const PLAYLIST_ID: &str = "2cc9ccb7-6221-4ccb-8387-f22b6a1b354d";

/// "La Petite Tonkinoise", the song whose tags get extended
const SONG_ID: &str = "756716f7-2e54-4715-9f00-91dcbea6cf50";

pub async fn print_playlist(session: &Session) -> eyre::Result<()> {
    let result = session
        .execute(format!(
            "SELECT * FROM {KEYSPACE}.playlists WHERE id = {PLAYLIST_ID}"
        ))
        .await?;
    println!("{}", format_rows(&result, &["title", "album", "artist"]));
    Ok(())
}

/// Add the `entre-deux-guerres` tag to La Petite Tonkinoise and print the
/// updated row, tags included.
pub async fn add_tag_and_report(session: &Session) -> eyre::Result<()> {
    session
        .execute(format!(
            "UPDATE {KEYSPACE}.songs \
             SET tags = tags + {{ 'entre-deux-guerres' }} \
             WHERE id = {SONG_ID}"
        ))
        .await?;
    info!("Tagged song {SONG_ID}");

    let result = session
        .execute(format!("SELECT * FROM {KEYSPACE}.songs WHERE id = {SONG_ID}"))
        .await?;
    println!(
        "{}",
        format_rows(&result, &["title", "album", "artist", "tags"])
    );
    Ok(())
}

/// The asynchronous example: submit the songs query without awaiting it, then
/// resolve the handle. Failure is reported, not propagated, mirroring a
/// failure callback.
pub async fn print_songs_async(session: &Session) -> eyre::Result<()> {
    let pending = session.execute_async(format!("SELECT * FROM {KEYSPACE}.songs"));

    match pending.wait().await {
        Ok(result) => println!(
            "{}",
            format_rows(&result, &["title", "album", "artist", "tags"])
        ),
        Err(err) => error!("async songs query failed: {err}"),
    }
    Ok(())
}
