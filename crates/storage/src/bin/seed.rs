use clap::Parser;
use storage::repository::Storage;
use trials_core::model::PlayerName;

/// Fill a score store with demo players.
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Args {
    /// SQLite URL of the score store.
    #[arg(long = "db", env = "TRIALS_DB_URL", default_value = "sqlite:clinical_trials.db")]
    db_url: String,

    /// Number of demo players to upsert.
    #[arg(long, env = "TRIALS_SEED_PLAYERS", default_value_t = 12)]
    players: u32,
}

const SAMPLE_NAMES: [&str; 6] = ["Ada", "Grace", "Linus", "Marie", "Rosalind", "Tu"];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let storage = Storage::sqlite(&args.db_url).await?;

    for i in 0..args.players {
        let idx = (i as usize) % SAMPLE_NAMES.len();
        let round = (i as usize) / SAMPLE_NAMES.len();
        let raw = if round == 0 {
            SAMPLE_NAMES[idx].to_string()
        } else {
            format!("{} {}", SAMPLE_NAMES[idx], round + 1)
        };
        let name = PlayerName::parse(raw)?;
        // Spread scores across the 0..=40 range a four-phase run can produce.
        let points = (i * 7 % 5) * 10;
        storage.scores.upsert_add(&name, points).await?;
    }

    println!("Seeded {} players into {}", args.players, args.db_url);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
