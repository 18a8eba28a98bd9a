pub mod client;
pub mod collab;
pub mod config;
pub mod error;
pub mod headers;
pub mod iterator;
pub mod lyrics;
pub mod normalize;
pub mod parsing;
pub mod r#trait;
pub mod types;

pub use client::GeniusClient;
pub use collab::{aggregate, CollaboratorEntry, CollaboratorIndex};
pub use config::ClientConfig;
pub use error::{CollabError, StatusClass};
pub use iterator::{
    collect_collaborators, collect_songs, fold_collaborators, AsyncPaginatedIterator,
    CatalogIterator, SongsQuery,
};
pub use lyrics::LyricsExtractor;
pub use normalize::{remove_unicode_artifacts, split_delimited_names, NameSplitter, UnicodeMap};
pub use parsing::{LyricsFailurePolicy, ParseOptions, SongMetadata, SongParser};
pub use r#trait::LyricsSource;
pub use types::{SearchParams, SearchResponse, SongRecord};

#[cfg(feature = "mock")]
pub use r#trait::MockLyricsSource;

pub type Result<T> = std::result::Result<T, CollabError>;
