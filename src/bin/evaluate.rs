//! Evaluate Binary
//!
//! Lists every way a hand melds out, one line per partition.
//!
//! Options: --hand, --deal, --top, --max-expansions, --timeout, --parallel, --json

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use remi::cards::Card;
use remi::cards::CardView;
use remi::cards::Deck;
use remi::melds::Partition;
use remi::players::Evaluation;
use remi::players::Player;
use remi::search::Config;
use remi::search::Exclusion;

#[derive(Parser)]
#[command(author, version, about = "Find every way a Remi hand melds out", long_about = None)]
struct Args {
    /// Cards to hold, e.g. "7c 7s 7h 7d **"
    #[arg(long, conflicts_with = "deal", required_unless_present = "deal")]
    hand: Option<String>,
    /// Deal this many cards from a shuffled table deck instead
    #[arg(long)]
    deal: Option<usize>,
    /// Card taken from the table, put in front of the hand
    #[arg(long)]
    top: Option<String>,
    /// Ceiling on recursive steps per exclusion
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Give up after this long, e.g. "500ms" or "5s"
    #[arg(long)]
    timeout: Option<String>,
    /// One task per exclusion
    #[arg(long)]
    parallel: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if !args.json {
        remi::log()?;
    }
    let mut player = Player::new("evaluate").with_config(config(&args)?);
    player.add_cards_to_hand(hand(&args)?);
    if let Some(ref top) = args.top {
        let card = Card::try_from(top.as_str())
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid top card {}", top))?;
        match player.can_meld_with(&card) {
            Ok(true) => log::info!("{:<16}{}", "top card melds", card),
            Ok(false) => log::info!("{:<16}{}", "top card idle", card),
            Err(e) => log::warn!("{:<16}{}", "top card", e),
        }
        player.add_card_to_hand(card);
    }
    log::info!("{:<16}{}", "hand", player.hand());
    let evaluation = evaluate(&mut player, args.parallel);
    match args.json {
        true => println!("{}", json(&player, &evaluation)?),
        false => print(&player, &evaluation),
    }
    Ok(())
}

fn config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::default();
    if let Some(n) = args.max_expansions {
        config = config.with_max_expansions(n);
    }
    if let Some(ref timeout) = args.timeout {
        let duration = remi::parse_duration(timeout)
            .with_context(|| format!("invalid timeout {}", timeout))?;
        config = config.with_timeout(duration);
    }
    Ok(config)
}

fn hand(args: &Args) -> anyhow::Result<Vec<Card>> {
    match (&args.hand, args.deal) {
        (Some(hand), _) => Card::parse(hand)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid hand {}", hand)),
        (None, Some(n)) => {
            let mut deck = Deck::new(remi::DECK_COPIES);
            deck.shuffle();
            anyhow::ensure!(n <= deck.size(), "cannot deal {} from {}", n, deck.size());
            Ok(deck.draw_many(n))
        }
        (None, None) => anyhow::bail!("either --hand or --deal is required"),
    }
}

#[cfg(feature = "parallel")]
fn evaluate(player: &mut Player, parallel: bool) -> Evaluation {
    match parallel {
        true => player.evaluate_combinations_parallel(),
        false => player.evaluate_combinations(),
    }
}
#[cfg(not(feature = "parallel"))]
fn evaluate(player: &mut Player, parallel: bool) -> Evaluation {
    if parallel {
        log::warn!("built without the parallel feature, searching sequentially");
    }
    player.evaluate_combinations()
}

fn print(player: &Player, evaluation: &Evaluation) {
    for combination in evaluation.combinations.iter() {
        println!(
            "{:<8}{}",
            discard(player, combination.exclusion),
            render(&combination.partition)
        );
    }
    for failure in evaluation.failures.iter() {
        println!(
            "{:<8}{}",
            discard(player, failure.exclusion),
            failure.error.to_string().yellow()
        );
    }
    println!("{}", evaluation);
}

fn json(player: &Player, evaluation: &Evaluation) -> anyhow::Result<String> {
    let combinations = evaluation
        .combinations
        .iter()
        .map(|c| {
            serde_json::json!({
                "discard": discard(player, c.exclusion),
                "exclusion": c.exclusion,
                "melds": c.partition.melds(),
            })
        })
        .collect::<Vec<_>>();
    let failures = evaluation
        .failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "discard": discard(player, f.exclusion),
                "error": f.error.to_string(),
            })
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "hand": player.hand().to_string(),
        "combinations": combinations,
        "failures": failures,
        "diagnostics": evaluation.diagnostics,
        "elapsed": evaluation.elapsed.as_secs_f64(),
    }))?)
}

fn discard(player: &Player, exclusion: Exclusion) -> String {
    exclusion
        .card()
        .and_then(|id| player.hand().get(id))
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

fn render(partition: &Partition) -> String {
    partition
        .melds()
        .iter()
        .map(|meld| {
            meld.views()
                .iter()
                .map(paint)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn paint(view: &CardView) -> String {
    let text = view.to_string();
    match (view.is_joker(), view.suit().is_red()) {
        (true, _) => text.bright_magenta().to_string(),
        (false, true) => text.red().to_string(),
        (false, false) => text,
    }
}
