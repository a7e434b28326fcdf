use anyhow::anyhow;
use clap::{Parser, Subcommand};
use log::warn;

use api::AppState;
use service::report::render;
use service::{RunOptions, RunOutcome};

#[derive(Parser, Debug)]
#[command(name = "disc-golf-fantasy")]
#[command(about = "Scores a fantasy disc golf league from PDGA live results")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score an event and publish the standings
    Score {
        /// Event name, as on the schedule
        #[arg(long)]
        event: String,
        /// PDGA tournament id, needed when the schedule has none
        #[arg(long)]
        tourn_id: Option<u32>,
        /// Round for live scores, defaults to the round in progress
        #[arg(long)]
        round: Option<u8>,
        /// Score the last completed round and update the season sheet
        #[arg(long = "final")]
        final_results: bool,
        #[arg(long)]
        no_discord: bool,
        #[arg(long)]
        no_sheets: bool,
    },
    /// Find the PDGA tournament id of an event
    Lookup {
        name: String,
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Run the HTTP trigger service
    Serve,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            // rocket installs its own logger
            api::launch()?
                .launch()
                .await
                .map_err(|e| anyhow!("{e}"))?;
        }
        Command::Score {
            event,
            tourn_id,
            round,
            final_results,
            no_discord,
            no_sheets,
        } => {
            init_logging();
            let state = AppState::from_env()?;
            let (event, tourn_id) = service::resolve_event(&state.config, &event, tourn_id)?;
            let options = RunOptions {
                round,
                final_results,
                post_discord: !no_discord,
                update_sheets: !no_sheets,
            };
            let outcome = service::run_event(
                &state.config,
                &event,
                tourn_id,
                state.provider.as_ref(),
                state.notifier.as_ref(),
                state.sheets.as_ref(),
                &options,
            )
            .await?;
            match outcome {
                RunOutcome::NoResults => warn!("No scores returned. Check the tournament ID and round."),
                RunOutcome::Scored { report, .. } => println!("{}", render(&report)),
            }
        }
        Command::Lookup { name, year } => {
            init_logging();
            let state = AppState::from_env()?;
            let listing = service::lookup_tournament(state.provider.as_ref(), &name, year).await?;
            println!("{} -> TournID {}", listing.name, listing.tournament_id);
        }
    }
    Ok(())
}
