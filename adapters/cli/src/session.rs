//! Interactive and automatic game loops.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use rand::Rng;
use tank_attack_core::{Event, Path, Position, TankId};
use tank_attack_system_turns::TurnController;
use tank_attack_world::{query, World};

use crate::board;

/// A single line typed at the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Request {
    Move { tank: TankId, target: Position },
    Quit,
}

/// Parses `<tank> <row> <column>` or `quit`.
pub(crate) fn parse_request(line: &str) -> Result<Request> {
    let mut words = line.split_whitespace();
    let first = words.next().context("expected `<tank> <row> <column>` or `quit`")?;
    if first.eq_ignore_ascii_case("quit") {
        return Ok(Request::Quit);
    }

    let tank = first
        .parse::<u32>()
        .with_context(|| format!("invalid tank id `{first}`"))?;
    let row = parse_coordinate(words.next(), "row")?;
    let column = parse_coordinate(words.next(), "column")?;
    if let Some(extra) = words.next() {
        bail!("unexpected trailing input `{extra}`");
    }

    Ok(Request::Move {
        tank: TankId::new(tank),
        target: Position::new(row, column),
    })
}

fn parse_coordinate(word: Option<&str>, name: &str) -> Result<u32> {
    let word = word.with_context(|| format!("missing {name}"))?;
    word.parse()
        .with_context(|| format!("invalid {name} `{word}`"))
}

/// Reads requests from `input` until `quit` or end of input.
pub(crate) fn play<R, I, W>(
    world: &mut World,
    controller: &TurnController,
    rng: &mut R,
    input: I,
    output: &mut W,
) -> Result<()>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    write!(output, "{}", board::render(world, &Path::empty()))?;
    prompt(world, output)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            prompt(world, output)?;
            continue;
        }

        let (tank, target) = match parse_request(&line) {
            Ok(Request::Quit) => break,
            Ok(Request::Move { tank, target }) => (tank, target),
            Err(error) => {
                writeln!(output, "{error:#}")?;
                prompt(world, output)?;
                continue;
            }
        };

        let mut events = Vec::new();
        match controller.request_move(world, tank, target, rng, &mut events) {
            Ok(path) => {
                report(&events, output)?;
                write!(output, "{}", board::render(world, &path))?;
            }
            Err(reason) => writeln!(output, "rejected: {reason}")?,
        }
        prompt(world, output)?;
    }

    Ok(())
}

/// Moves a random tank of the active side toward a random cell each turn.
pub(crate) fn auto<R, W>(
    world: &mut World,
    controller: &TurnController,
    rng: &mut R,
    turns: u32,
    output: &mut W,
) -> Result<()>
where
    R: Rng + ?Sized,
    W: Write,
{
    let grid = query::grid(world);
    let (rows, columns) = (grid.rows(), grid.columns());

    for turn in 1..=turns {
        let active = query::active_side(world);
        let candidates: Vec<TankId> = query::tank_view(world)
            .iter()
            .filter(|tank| tank.side == active)
            .map(|tank| tank.id)
            .collect();
        if candidates.is_empty() {
            writeln!(output, "side {active:?} has no tanks")?;
            break;
        }

        let tank = candidates[rng.gen_range(0..candidates.len())];
        let target = Position::new(rng.gen_range(0..rows), rng.gen_range(0..columns));

        let mut events = Vec::new();
        let path = controller.request_move(world, tank, target, rng, &mut events)?;
        let position = query::tank(world, tank).map(|snapshot| snapshot.position);
        writeln!(
            output,
            "turn {turn}: tank {tank} {} toward {target:?} -> {} cells, now at {position:?}",
            algorithm_of(&events),
            path.len(),
        )?;
    }

    write!(output, "{}", board::render(world, &Path::empty()))?;
    Ok(())
}

fn prompt<W: Write>(world: &World, output: &mut W) -> Result<()> {
    write!(output, "{:?} to move> ", query::active_side(world))?;
    output.flush()?;
    Ok(())
}

fn report<W: Write>(events: &[Event], output: &mut W) -> Result<()> {
    for event in events {
        match event {
            Event::MovePlanned {
                tank,
                algorithm,
                path,
            } => writeln!(
                output,
                "tank {tank} planned with {algorithm}: {:?}",
                path.cells()
            )?,
            Event::StepRejected { tank, to } => {
                writeln!(output, "tank {tank} could not step to {to:?}")?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn algorithm_of(events: &[Event]) -> String {
    events
        .iter()
        .find_map(|event| match event {
            Event::MovePlanned { algorithm, .. } => Some(algorithm.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tank_attack_core::{Faction, GameConfig, Side};
    use tank_attack_world::Layout;

    use super::*;

    #[test]
    fn parses_moves_and_quit() {
        assert_eq!(
            parse_request(" 3 4 17 ").expect("valid"),
            Request::Move {
                tank: TankId::new(3),
                target: Position::new(4, 17),
            }
        );
        assert_eq!(parse_request("QUIT").expect("valid"), Request::Quit);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_request("red 1 2").is_err());
        assert!(parse_request("1 2").is_err());
        assert!(parse_request("1 2 x").is_err());
        assert!(parse_request("1 2 3 4").is_err());
        assert!(parse_request("1 -2 3").is_err());
    }

    fn duel() -> World {
        World::from_layout(
            Layout::new(3, 4)
                .with_tank(Faction::Blue, Position::new(0, 0))
                .with_tank(Faction::Cyan, Position::new(2, 3)),
        )
        .expect("valid layout")
    }

    #[test]
    fn play_applies_moves_and_reports_rejections() {
        let mut world = duel();
        let controller = TurnController::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let input = Cursor::new("1 0 0\n0 0 3\nnonsense\n\nquit\n0 2 2\n");
        let mut output = Vec::new();

        play(&mut world, &controller, &mut rng, input, &mut output).expect("session runs");

        let text = String::from_utf8(output).expect("utf-8 output");
        assert!(text.contains("rejected: tank 1 does not belong to the active side One"));
        assert!(text.contains("tank 0 planned with"));
        assert!(text.contains("invalid tank id `nonsense`"));
        assert_eq!(query::active_side(&world), Side::Two);
    }

    #[test]
    fn play_stops_at_end_of_input() {
        let mut world = duel();
        let controller = TurnController::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut output = Vec::new();

        play(
            &mut world,
            &controller,
            &mut rng,
            Cursor::new("0 1 1\n"),
            &mut output,
        )
        .expect("session runs");

        assert_eq!(query::active_side(&world), Side::Two);
    }

    #[test]
    fn auto_plays_requested_turns() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut world = World::generate(&config, &mut rng).expect("default config generates");
        let controller = TurnController::from_config(&config);
        let mut output = Vec::new();

        auto(&mut world, &controller, &mut rng, 6, &mut output).expect("auto runs");

        let text = String::from_utf8(output).expect("utf-8 output");
        assert_eq!(text.lines().filter(|line| line.starts_with("turn ")).count(), 6);
        assert_eq!(query::active_side(&world), Side::One);
    }
}
