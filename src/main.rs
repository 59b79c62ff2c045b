#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vix_squirrel::{
    Error, PlaybackResult, VixPlayer,
    util::{init_http_client, truncate_string},
    vix::DEFAULT_BASE_URL,
};

/// Resolves a movie or TV episode into its signed HLS master playlist
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    target: Target,

    /// Language code to request, defaults to `en` upstream
    #[arg(short, long, default_value = "", global = true)]
    lang: String,

    /// Player website to scrape
    #[arg(long, env = "VIX_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Print the whole result as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Target {
    /// Look up a movie
    Movie {
        /// TMDB ID of the movie
        tmdb_id: String,
    },
    /// Look up an episode of a show
    Show {
        /// TMDB ID of the show
        tmdb_id: String,
        season: u32,
        episode: u32,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let player = VixPlayer::new(args.base_url, Some(init_http_client()));

    let result = match &args.target {
        Target::Movie { tmdb_id } => {
            info!("Looking up movie {tmdb_id}");
            player.get_movie(tmdb_id, &args.lang).await
        }
        Target::Show {
            tmdb_id,
            season,
            episode,
        } => {
            info!("Looking up show {tmdb_id} S{season:02}E{episode:02}");
            player.get_show(tmdb_id, *season, *episode, &args.lang).await
        }
    };

    let result = match result {
        Ok(r) => r,
        Err(Error::NotFound) => {
            warn!("Content does not exist on {}", player.base_url());
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e).context("Resolving playback URL"),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("Serializing result")?;
        println!("{json}");
    } else {
        print_summary(&result);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(result: &PlaybackResult) {
    let video = &result.video;
    println!(
        "{} ({}p, {} fps, {}s)",
        truncate_string(&video.name, 80),
        video.quality,
        video.fps,
        video.duration
    );
    println!("Uploaded {}, {} views", video.created_at_diff, video.views);
    for stream in &result.streams {
        let marker = if stream.active { "*" } else { " " };
        println!("{marker} {}: {}", stream.name, stream.url);
    }
    println!("{}", result.master_url);
}
