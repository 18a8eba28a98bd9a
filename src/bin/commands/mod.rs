pub mod utils;

use clap::{Args, Subcommand};
use genius_collab::{
    collect_collaborators, collect_songs, GeniusClient, LyricsFailurePolicy, SearchParams,
    SongsQuery,
};

/// Paging options shared by `songs` and `features`
#[derive(Args, Clone)]
pub struct PagingArgs {
    /// First search page to request
    #[arg(long, default_value = "1")]
    start_page: u32,

    /// Results per search page
    #[arg(long, default_value = "10")]
    per_page: u32,

    /// Number of search pages to walk
    #[arg(long, default_value = "3")]
    pages: u32,

    /// Pages to advance between requests
    #[arg(long, default_value = "1")]
    page_increment: u32,

    /// Do not read featured artists
    #[arg(long)]
    no_features: bool,

    /// Keep songs whose lyrics fail to load, with empty lyrics
    #[arg(long)]
    placeholder_lyrics: bool,

    /// Lyrics pages fetched in parallel per search page
    #[arg(long, default_value = "1")]
    concurrency: usize,
}

impl PagingArgs {
    fn into_query(self, name: &str) -> SongsQuery {
        let policy = if self.placeholder_lyrics {
            LyricsFailurePolicy::Placeholder
        } else {
            LyricsFailurePolicy::Abort
        };

        SongsQuery::new(name)
            .start_page(self.start_page)
            .per_page(self.per_page)
            .pages(self.pages)
            .page_increment(self.page_increment)
            .features(!self.no_features)
            .failure_policy(policy)
            .fetch_concurrency(self.concurrency)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the raw API response
    ///
    /// Usage examples:
    /// # First page of results for an artist
    /// genius-collab search "Kacey Musgraves"
    ///
    /// # Second page, five results
    /// genius-collab search "Kacey Musgraves" --page 2 --per-page 5
    Search {
        /// Search keyword
        name: String,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Print title, artists, path and lyrics for an artist's songs as JSON
    ///
    /// Usage examples:
    /// genius-collab songs "Kacey Musgraves" --pages 2 --per-page 5
    Songs {
        /// Artist name
        name: String,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Print the artist's collaborators, with song counts and titles, as JSON
    ///
    /// Usage examples:
    /// genius-collab features "Calvin Harris" --limit 5
    Features {
        /// Artist name
        name: String,

        #[command(flatten)]
        paging: PagingArgs,

        /// Stop once more than this many collaborators are found
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub async fn execute_command(
    command: Commands,
    client: &GeniusClient,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Search {
            name,
            page,
            per_page,
        } => {
            let response = client
                .search(&name, Some(SearchParams { page, per_page }))
                .await?;
            println!("{}", response.body);
        }
        Commands::Songs { name, paging } => {
            let query = paging.into_query(&name);
            let songs = collect_songs(client, &query).await?;
            utils::print_json(&songs)?;
        }
        Commands::Features {
            name,
            paging,
            limit,
        } => {
            let query = paging.into_query(&name);
            let collaborators = collect_collaborators(client, &query, limit).await?;
            utils::print_json(&collaborators)?;
        }
    }
    Ok(())
}
