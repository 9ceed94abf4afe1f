use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use gridrace::{CollisionRule, CrashRule, Race, RuleSet, WinRule};
use judge::{
    play_race, render_race, MoveSource, RaceFile, RaceResult, RandomMoves, Recorder, ScriptedMoves,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the race file with the circuit and the players
    race_file: PathBuf,

    /// What happens on a crash: "leave-race" or "continue-with-penalty"
    #[arg(long, default_value_t = CrashRule::LeaveRace)]
    crash_rule: CrashRule,

    /// What happens on a collision: "allowed" or "not-allowed"
    #[arg(long, default_value_t = CollisionRule::NotAllowed)]
    collision_rule: CollisionRule,

    /// How many races to play
    #[arg(short, long, default_value_t = 100)]
    num_races: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a race after this many move requests
    #[arg(short, long, default_value_t = 1000)]
    max_turns: usize,

    /// Play the moves from this JSON file of [dx, dy] pairs instead of random ones
    #[arg(long)]
    moves: Option<PathBuf>,

    /// Record the races' move outcomes as JSON files into this directory
    #[arg(short, long)]
    record_races_to_directory: Option<PathBuf>,

    /// Print the track after each race
    #[arg(long, default_value_t = false)]
    render: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct RaceScore {
    wins: BTreeMap<String, usize>,
    all_retired: usize,
    turn_limit_reached: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_races_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let race_file = RaceFile::load(&args.race_file)?;
    let script = args.moves.as_deref().map(ScriptedMoves::load).transpose()?;
    let rules = RuleSet {
        win: WinRule::FirstCrossing,
        crash: args.crash_rule,
        collision: args.collision_rule,
    };
    info!(crash = %rules.crash, collision = %rules.collision, "Rules");

    let mut score = RaceScore::default();
    for race_idx in 0..args.num_races {
        let competitors = race_file.competitors(&mut rng);
        let mut race = Race::with_rules(race_file.track.clone(), competitors, rules)?;
        let mut moves: Box<dyn MoveSource> = match &script {
            Some(script) => Box::new(script.clone()),
            None => Box::new(RandomMoves::new(StdRng::seed_from_u64(rng.gen()))),
        };

        let result = play_race(&mut race, moves.as_mut(), &mut recorder, args.max_turns)?;
        match result {
            RaceResult::Won { name } => {
                debug!(winner = name, race_idx);
                *score.wins.entry(name).or_default() += 1;
            }
            RaceResult::AllRetired => {
                debug!(race_idx, "All competitors retired");
                score.all_retired += 1;
            }
            RaceResult::TurnLimitReached => {
                debug!(race_idx, "Turn limit reached");
                score.turn_limit_reached += 1;
            }
        }
        if args.render {
            println!("{}", render_race(&race));
        }
    }

    print_score(&score, args.num_races);
    Ok(())
}

fn print_score(score: &RaceScore, num_races: usize) {
    let mut summary = String::from("End result:");
    for (name, wins) in &score.wins {
        summary += &format!("\n- {} wins by {}", wins, name);
    }
    summary += &format!(
        "\n- {} races where everybody crashed\n- {} races stopped after the turn limit\n({} races in total)",
        score.all_retired, score.turn_limit_reached, num_races
    );
    eprintln!("{}", summary);
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
