use clap::Parser;
use serde::Serialize;

use hexsettle::game::{GameConfig, GamePlay};

#[derive(Debug, Parser, Clone)]
#[command(name = "hexsettle-sim")]
#[command(about = "Hex settlement simulator - run seeded games between autonomous agents")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    num: u32,

    /// Number of agents at the table (2-4)
    #[arg(long, default_value_t = 4)]
    agents: usize,

    /// Maximum rounds before a game is called without a victor
    #[arg(long, default_value_t = 8192)]
    max_rounds: u32,

    /// Victory points needed to win
    #[arg(long, default_value_t = 10)]
    vps_to_win: u8,

    /// Random seed for reproducibility; game i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,

    /// Silence the plain-text summary
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    games: u32,
    agent_names: Vec<String>,
    wins: Vec<u32>,
    draws: u32,
    total_rounds: u64,
    total_turns: u64,
}

impl Summary {
    fn new(agent_names: Vec<String>) -> Self {
        let agents = agent_names.len();
        Self {
            games: 0,
            agent_names,
            wins: vec![0; agents],
            draws: 0,
            total_rounds: 0,
            total_turns: 0,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !(2..=4).contains(&args.agents) {
        eprintln!("Error: between 2 and 4 agents are supported");
        std::process::exit(1);
    }

    match run(&args) {
        Ok(summary) => report(&args, &summary),
        Err(err) => {
            eprintln!("simulation failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Summary, hexsettle::GameError> {
    let mut summary: Option<Summary> = None;
    for game_idx in 0..args.num {
        let config = GameConfig {
            num_agents: args.agents,
            max_rounds: args.max_rounds,
            vps_to_win: args.vps_to_win,
            seed: args.seed + game_idx as u64,
        };
        let mut game = GamePlay::new(config);
        let summary = summary.get_or_insert_with(|| {
            Summary::new(
                game.agents()
                    .iter()
                    .map(|agent| agent.name().to_string())
                    .collect(),
            )
        });
        let outcome = game.run()?;
        summary.games += 1;
        summary.total_rounds += outcome.rounds as u64;
        summary.total_turns += outcome.turns as u64;
        match outcome.winner {
            Some(agent) => summary.wins[agent] += 1,
            None => summary.draws += 1,
        }
    }
    Ok(summary.unwrap_or_else(|| Summary::new(Vec::new())))
}

fn report(args: &Args, summary: &Summary) {
    if args.json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("failed to serialize summary: {err}"),
        }
        return;
    }
    if args.quiet {
        return;
    }

    println!("=== {} game(s) ===", summary.games);
    for (name, wins) in summary.agent_names.iter().zip(summary.wins.iter()) {
        println!("{name}: {wins} win(s)");
    }
    if summary.draws > 0 {
        println!("no victor: {} game(s)", summary.draws);
    }
    if summary.games > 0 {
        println!(
            "avg rounds: {:.1}, avg turns: {:.1}",
            summary.total_rounds as f64 / summary.games as f64,
            summary.total_turns as f64 / summary.games as f64
        );
    }
}
