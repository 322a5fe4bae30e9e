//! The song and playlist fixtures, loadable through either statement
//! construction strategy.

use cql_client::{CqlValue, Session};
use tracing::info;
use uuid::Uuid;

use crate::schema::KEYSPACE;

/// How INSERT statements are built: interpolated CQL text, or one prepared
/// template per table bound with typed values per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Literal,
    Prepared,
}

pub struct Song {
    pub id: &'static str,
    pub title: &'static str,
    pub album: &'static str,
    pub artist: &'static str,
    pub tags: &'static [&'static str],
}

pub struct PlaylistEntry {
    pub id: &'static str,
    pub song_id: &'static str,
    pub title: &'static str,
    pub album: &'static str,
    pub artist: &'static str,
}

pub const SONGS: [Song; 3] = [
    Song {
        id: "756716f7-2e54-4715-9f00-91dcbea6cf50",
        title: "La Petite Tonkinoise",
        album: "Bye Bye Blackbird",
        artist: "Joséphine Baker",
        tags: &["jazz", "2013"],
    },
    Song {
        id: "f6071e72-48ec-4fcb-bf3e-379c8a696488",
        title: "Die Mösch",
        album: "In Gold",
        artist: "Willi Ostermann",
        tags: &["kölsch", "1996", "birds"],
    },
    Song {
        id: "fbdf82ed-0063-4796-9c7c-a3d4f47b4b25",
        title: "Memo From Turner",
        album: "Performance",
        artist: "Mick Jager",
        tags: &["soundtrack", "1991"],
    },
];

pub const PLAYLISTS: [PlaylistEntry; 3] = [
    PlaylistEntry {
        id: "2cc9ccb7-6221-4ccb-8387-f22b6a1b354d",
        song_id: "756716f7-2e54-4715-9f00-91dcbea6cf50",
        title: "La Petite Tonkinoise",
        album: "Bye Bye Blackbird",
        artist: "Joséphine Baker",
    },
    PlaylistEntry {
        id: "2cc9ccb7-6221-4ccb-8387-f22b6a1b354d",
        song_id: "f6071e72-48ec-4fcb-bf3e-379c8a696488",
        title: "Die Mösch",
        album: "In Gold",
        artist: "Willi Ostermann",
    },
    PlaylistEntry {
        id: "3fd2bedf-a8c8-455a-a462-0cd3a4353c54",
        song_id: "fbdf82ed-0063-4796-9c7c-a3d4f47b4b25",
        title: "Memo From Turner",
        album: "Performance",
        artist: "Mick Jager",
    },
];

pub async fn load_data(session: &Session, mode: LoadMode) -> eyre::Result<()> {
    match mode {
        LoadMode::Literal => load_literal(session).await?,
        LoadMode::Prepared => load_prepared(session).await?,
    }
    info!("Data loaded ({mode:?} statements)");
    Ok(())
}

async fn load_literal(session: &Session) -> eyre::Result<()> {
    for song in &SONGS {
        session.execute(song_insert_cql(song)).await?;
    }
    for entry in &PLAYLISTS {
        session.execute(playlist_insert_cql(entry)).await?;
    }
    Ok(())
}

async fn load_prepared(session: &Session) -> eyre::Result<()> {
    let insert_song = session
        .prepare(&format!(
            "INSERT INTO {KEYSPACE}.songs (id, title, album, artist, tags) \
             VALUES (?, ?, ?, ?, ?)"
        ))
        .await?;
    for song in &SONGS {
        let tags = song
            .tags
            .iter()
            .map(|tag| CqlValue::Text(tag.to_string()))
            .collect();
        let bound = insert_song.bind(vec![
            CqlValue::Uuid(Uuid::parse_str(song.id)?),
            CqlValue::Text(song.title.to_string()),
            CqlValue::Text(song.album.to_string()),
            CqlValue::Text(song.artist.to_string()),
            CqlValue::Set(tags),
        ])?;
        session.execute(bound).await?;
    }

    let insert_entry = session
        .prepare(&format!(
            "INSERT INTO {KEYSPACE}.playlists (id, song_id, title, album, artist) \
             VALUES (?, ?, ?, ?, ?)"
        ))
        .await?;
    for entry in &PLAYLISTS {
        let bound = insert_entry.bind(vec![
            CqlValue::Uuid(Uuid::parse_str(entry.id)?),
            CqlValue::Uuid(Uuid::parse_str(entry.song_id)?),
            CqlValue::Text(entry.title.to_string()),
            CqlValue::Text(entry.album.to_string()),
            CqlValue::Text(entry.artist.to_string()),
        ])?;
        session.execute(bound).await?;
    }
    Ok(())
}

fn song_insert_cql(song: &Song) -> String {
    let tags: Vec<String> = song.tags.iter().map(|tag| format!("'{tag}'")).collect();
    format!(
        "INSERT INTO {KEYSPACE}.songs (id, title, album, artist, tags) \
         VALUES ({}, '{}', '{}', '{}', {{{}}})",
        song.id,
        song.title,
        song.album,
        song.artist,
        tags.join(", ")
    )
}

fn playlist_insert_cql(entry: &PlaylistEntry) -> String {
    format!(
        "INSERT INTO {KEYSPACE}.playlists (id, song_id, title, album, artist) \
         VALUES ({}, {}, '{}', '{}', '{}')",
        entry.id, entry.song_id, entry.title, entry.album, entry.artist
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_ids_are_valid_uuids() {
        for song in &SONGS {
            assert!(Uuid::parse_str(song.id).is_ok());
        }
        for entry in &PLAYLISTS {
            assert!(Uuid::parse_str(entry.id).is_ok());
            assert!(Uuid::parse_str(entry.song_id).is_ok());
        }
    }

    #[test]
    fn test_playlist_entries_reference_known_songs() {
        for entry in &PLAYLISTS {
            assert!(SONGS.iter().any(|song| song.id == entry.song_id));
        }
    }

    #[test]
    fn test_song_insert_cql_shape() {
        let cql = song_insert_cql(&SONGS[0]);
        assert!(cql.starts_with("INSERT INTO simplex.songs"));
        assert!(cql.contains("756716f7-2e54-4715-9f00-91dcbea6cf50"));
        assert!(cql.contains("'La Petite Tonkinoise'"));
        assert!(cql.contains("{'jazz', '2013'}"));
    }

    #[test]
    fn test_playlist_insert_cql_shape() {
        let cql = playlist_insert_cql(&PLAYLISTS[2]);
        assert!(cql.starts_with("INSERT INTO simplex.playlists"));
        assert!(cql.contains("3fd2bedf-a8c8-455a-a462-0cd3a4353c54"));
        assert!(cql.contains("'Memo From Turner'"));
    }
}
