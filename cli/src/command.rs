use std::str::FromStr;

use anyhow::{Context, bail};
use sweeper_core::{Coord, Coord2};

pub const HELP: &str = "\
Commands:
  r ROW COL   reveal a cell
  f ROW COL   flag or unflag a cell
  c ROW COL   reveal around a satisfied number
  n           new game
  h           this help
  q           quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    New,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command, type h for help");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "c" | "chord" => Self::Chord(parse_coords(&mut words)?),
            "n" | "new" => Self::New,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("Unknown command {other:?}, type h for help"),
        };

        if words.next().is_some() {
            bail!("Too many arguments for {verb:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<Coord> {
        let word = words
            .next()
            .with_context(|| format!("Missing {axis}, expected ROW COL"))?;
        word.parse()
            .with_context(|| format!("Invalid {axis} {word:?}"))
    };

    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}
