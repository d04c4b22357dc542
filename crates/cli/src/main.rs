mod app;

use anyhow::Result;
use app::{AppState, Config};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::MovieRecord;
use std::path::PathBuf;
use watchlist::AddOutcome;

/// BingeBuddy - browse movies by genre and keep a watchlist
#[derive(Parser)]
#[command(name = "binge-buddy")]
#[command(about = "Browse a movie dataset by genre, search titles and keep a watchlist", long_about = None)]
struct Cli {
    /// Path to the movie genre CSV file
    #[arg(short, long, default_value = "MovieGenre.csv")]
    dataset: PathBuf,

    /// Path to the watchlist JSON file
    #[arg(short, long, default_value = "watchlist.json")]
    watchlist: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every genre with its number of movies
    Genres,

    /// Show the movies in a genre
    Browse {
        /// Genre label, e.g. "Sci-Fi"
        #[arg(long)]
        genre: String,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Recommend a random movie
    Random {
        /// Also add the pick to the watchlist
        #[arg(long)]
        add: bool,
    },

    /// Show the watchlist
    Watchlist,

    /// Add a movie to the watchlist by exact title
    Add {
        #[arg(long)]
        title: String,
    },

    /// Remove a movie from the watchlist by exact title
    Remove {
        #[arg(long)]
        title: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        dataset: cli.dataset,
        watchlist: cli.watchlist,
    };

    let mut state = AppState::init(&config);
    for notice in &state.notices {
        eprintln!("{} {}", "!".yellow().bold(), notice);
    }

    match cli.command {
        Commands::Genres => handle_genres(&state),
        Commands::Browse { genre } => handle_browse(&state, &genre),
        Commands::Search { title } => handle_search(&state, &title),
        Commands::Random { add } => handle_random(&mut state, add),
        Commands::Watchlist => handle_watchlist(&state),
        Commands::Add { title } => handle_add(&mut state, &title),
        Commands::Remove { title } => handle_remove(&mut state, &title),
    }

    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(state: &AppState) {
    if state.index.is_empty() {
        println!("No genres found");
        return;
    }
    println!("{}", "Genres:".bold().blue());
    for genre in state.index.genres() {
        println!("  {} ({})", genre, state.index.movies_by_genre(genre).len());
    }
}

/// Handle the 'browse' command
fn handle_browse(state: &AppState, genre: &str) {
    let movies = state.index.movies_by_genre(genre);
    if movies.is_empty() {
        println!("No movies found for this genre");
        return;
    }
    println!("{}", format!("{} movies:", genre).bold().blue());
    for movie in movies {
        print_movie(movie);
    }
}

/// Handle the 'search' command
fn handle_search(state: &AppState, title: &str) {
    let matches = state.index.search_title(title);
    if matches.is_empty() {
        println!("No movies found for '{}'", title.to_lowercase());
        return;
    }
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for movie in matches {
        print_movie(movie);
    }
}

/// Handle the 'random' command
fn handle_random(state: &mut AppState, add: bool) {
    let Some(movie) = state.index.random_movie(&mut rand::rng()).cloned() else {
        println!("No movies loaded!");
        return;
    };
    println!("{}", "🎉 Your Random Pick".bold().red());
    print_movie(&movie);

    if add {
        report_add(&movie, state.watchlist.add(&movie));
    }
}

/// Handle the 'watchlist' command
fn handle_watchlist(state: &AppState) {
    if state.watchlist.is_empty() {
        println!("Your watchlist is empty!");
        return;
    }
    println!("{}", "Your Watchlist".bold().blue());
    for movie in state.watchlist.entries() {
        print_movie(movie);
    }
}

/// Handle the 'add' command
fn handle_add(state: &mut AppState, title: &str) {
    match state.add_to_watchlist(title) {
        Ok((movie, outcome)) => print_add_outcome(&movie, outcome),
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }
}

/// Handle the 'remove' command
fn handle_remove(state: &mut AppState, title: &str) {
    match state.watchlist.remove(title) {
        Ok(0) => println!("{} was not in your watchlist", title),
        Ok(_) => println!("{} {} removed from watchlist", "✓".green(), title),
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }
}

fn report_add(movie: &MovieRecord, outcome: watchlist::Result<AddOutcome>) {
    match outcome {
        Ok(outcome) => print_add_outcome(movie, outcome),
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }
}

fn print_add_outcome(movie: &MovieRecord, outcome: AddOutcome) {
    match outcome {
        AddOutcome::Added => println!("{} {} added to watchlist!", "✓".green(), movie.title),
        AddOutcome::AlreadyPresent => println!("{} is already in your watchlist!", movie.title),
    }
}

/// Print one movie line: title, score, year, genres and poster URL
fn print_movie(movie: &MovieRecord) {
    println!(
        "  {} (⭐ {:.1}, {}, 🏷️ {})",
        movie.title.bold(),
        movie.score,
        movie.year_label(),
        movie.genres_label()
    );
    println!("     {}", movie.poster.dimmed());
}
