use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use covisit::{
    most_similar_users, read_checkins_from_path, recommend_venues, write_edge_list_to_path,
    CancelToken, InteractionGraph, NetworkType, Result, ScanStrategy, VenueFilter, VenueProfiles,
};

#[derive(Parser)]
#[command(
    name = "covisit",
    version,
    about = "User interaction networks and venue recommendations from location check-ins"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the interaction graph and write it as a CSV edge list
    Graph {
        /// Check-in CSV file
        #[arg(long)]
        input: PathBuf,
        /// Edge criterion, `colocation` or `taste`
        #[arg(long, default_value = "colocation")]
        network_type: String,
        /// Output CSV file for the edge list
        #[arg(long)]
        output: PathBuf,
        /// Compare every user pair instead of walking the venue index
        #[arg(long)]
        pairwise: bool,
    },
    /// Rank all users by venue-category overlap with one user
    Similar {
        /// Check-in CSV file
        #[arg(long)]
        input: PathBuf,
        /// Target user id
        #[arg(long)]
        user: u64,
        /// Number of rows to print
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Recommend venues from the most similar user's history
    Recommend {
        /// Check-in CSV file
        #[arg(long)]
        input: PathBuf,
        /// Target user id
        #[arg(long)]
        user: u64,
        /// Maximum number of venues to return
        #[arg(long, default_value_t = covisit::DEFAULT_COUNT)]
        count: usize,
        /// Skip venues the user has already checked in at
        #[arg(long)]
        exclude_visited: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(error) = run(Cli::parse()) {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Graph {
            input,
            network_type,
            output,
            pairwise,
        } => {
            let network_type = NetworkType::from_str(&network_type)?;
            let records = read_checkins_from_path(&input)?;
            let profiles = VenueProfiles::build(&records, network_type);

            let strategy = if pairwise {
                ScanStrategy::Pairwise
            } else {
                ScanStrategy::CoVisitation
            };
            let graph = InteractionGraph::build(&profiles, strategy, &CancelToken::new())?;

            write_edge_list_to_path(&graph, &output)?;
            println!("{} edges written to {}", graph.num_edges(), output.display());
        }
        Command::Similar { input, user, top } => {
            let records = read_checkins_from_path(&input)?;
            let profiles = VenueProfiles::build(&records, NetworkType::Taste);

            for row in most_similar_users(&profiles, user)?.iter().take(top) {
                println!(
                    "{:>8}  overlap {:>6}  {:>6.2}%",
                    row.user, row.overlap_count, row.percentage_overlap
                );
            }
        }
        Command::Recommend {
            input,
            user,
            count,
            exclude_visited,
        } => {
            let records = read_checkins_from_path(&input)?;
            let profiles = VenueProfiles::build(&records, NetworkType::Taste);

            let filter = if exclude_visited {
                VenueFilter::ByVisitedVenues
            } else {
                VenueFilter::ByUserId
            };
            for venue in recommend_venues(&profiles, user, count, filter)? {
                println!("{venue}");
            }
        }
    }
    Ok(())
}
