#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

mod config;
mod editor;
mod history;
mod net;

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use env_logger::TimestampPrecision;
use log::{LevelFilter, debug};
use owo_colors::OwoColorize;
use scramble_core::{CubeState, Face, NeutralMask, ScrambleSequence, Sticker, parser::parse_lenient};

use crate::{config::Config, editor::Editor};

/// Parses, rewrites and replays cube move sequences
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The configuration file to use, in TOML format. Defaults to
    /// `scramble/config.toml` in the user's config directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Read sequences leniently, picking moves out of arbitrary text
    #[arg(short, long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random scramble
    Random {
        /// Number of moves; defaults to the configured length
        #[arg(short = 'n', long)]
        length: Option<usize>,
        /// Seed for a reproducible scramble
        #[arg(short, long)]
        seed: Option<u64>,
        /// Also draw the scrambled cube
        #[arg(long)]
        net: bool,
    },
    /// Print a sequence in canonical form with its move counts and cube
    Show {
        sequence: String,
        /// Replay groups as written instead of performing each turn once
        #[arg(long)]
        developed: bool,
        /// Stickers to draw as don't-care, such as `D1,D3,D5,D7`
        #[arg(long, value_delimiter = ',')]
        neutral: Vec<String>,
        /// Rotation to re-key the don't-care stickers by, such as `x2`
        #[arg(long, requires = "neutral")]
        mask_rotation: Option<String>,
    },
    /// Merge adjacent turns of the same layer
    Shrink { sequence: String },
    /// Merge turns, letting turns on the same axis pass each other
    Simplify { sequence: String },
    /// Print the inverse sequence
    Invert { sequence: String },
    /// Expand repeated groups
    Develop {
        sequence: String,
        /// Keep the parentheses of groups performed once
        #[arg(long)]
        keep_single: bool,
    },
    /// Remove whole-cube rotations, renaming the turns after them
    Unrotate { sequence: String },
    /// Expand wide, whole-layer and compound turns into single-layer turns
    Basic { sequence: String },
    /// Conjugate a sequence by a whole-cube rotation
    Conjugate {
        /// A rotation such as `x`, `y'` or `z2`
        rotation: String,
        sequence: String,
    },
    /// Count moves under HTM, QTM, STM and ETM
    Count { sequence: String },
    /// Edit a sequence interactively
    Edit {
        /// The sequence to start from
        #[arg(default_value = "")]
        sequence: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if !io::stdout().is_terminal() {
        config.display.color = false;
    }
    debug!("Using {config:?}");

    let separator = config.editor.separator.as_str();
    let read = |text: &str| {
        if cli.lenient {
            parse_lenient(text)
        } else {
            ScrambleSequence::from_text_with(text, separator)
        }
    };

    match cli.command {
        Commands::Random { length, seed, net } => {
            let seed = seed.unwrap_or_else(|| fastrand::u64(..));
            let sequence =
                ScrambleSequence::random(length.unwrap_or(config.scramble.length), seed);
            debug!("Random scramble from seed {seed}");

            println!("{}", sequence.to_text(separator));
            if net {
                let mut state = CubeState::new();
                state.apply_scramble(&sequence);
                print!("{}", net::render(&state, config.display.color));
            }
        }
        Commands::Show {
            sequence,
            developed,
            neutral,
            mask_rotation,
        } => {
            let sequence = read(&sequence);
            let mut state = CubeState::new();

            if !neutral.is_empty() {
                let stickers = neutral
                    .iter()
                    .map(|name| parse_sticker(name))
                    .collect::<color_eyre::Result<Vec<_>>>()?;
                state.set_neutral_mask(NeutralMask::from_stickers(stickers));
            }
            if let Some(rotation) = mask_rotation {
                state.rotate_neutral_mask(editor::parse_rotation(&rotation)?);
            }

            if developed {
                state.apply_developed(&sequence)?;
            } else {
                state.apply_scramble(&sequence);
            }

            println!("{}", sequence.to_text(separator));
            if !sequence.are_parentheses_ok() {
                println!(
                    "{}",
                    format!("{} groups left open", sequence.nest_value()).yellow()
                );
            }
            println!("{}", editor::counts(&sequence));
            print!("{}", net::render(&state, config.display.color));
            if state.is_solved() {
                println!("{}", "Solved".green());
            }
        }
        Commands::Shrink { sequence } => {
            let mut sequence = read(&sequence);
            sequence.shrink();
            println!("{}", sequence.to_text(separator));
        }
        Commands::Simplify { sequence } => {
            let mut sequence = read(&sequence);
            sequence.simplify(..)?;
            println!("{}", sequence.to_text(separator));
        }
        Commands::Invert { sequence } => {
            let mut sequence = read(&sequence);
            sequence.inverse_and_reverse()?;
            println!("{}", sequence.to_text(separator));
        }
        Commands::Develop {
            sequence,
            keep_single,
        } => {
            let mut sequence = read(&sequence);
            sequence.develop_groups(!keep_single)?;
            println!("{}", sequence.to_text(separator));
        }
        Commands::Unrotate { sequence } => {
            let mut sequence = read(&sequence);
            sequence.remove_turns()?;
            println!("{}", sequence.to_text(separator));
        }
        Commands::Basic { sequence } => {
            let mut sequence = read(&sequence);
            sequence.to_basic_steps();
            println!("{}", sequence.to_text(separator));
        }
        Commands::Conjugate { rotation, sequence } => {
            let rotation = editor::parse_rotation(&rotation)?;
            let mut sequence = read(&sequence);
            sequence.apply_turn(rotation.layer().axis(), rotation.movement(), ..)?;
            println!("{}", sequence.to_text(separator));
        }
        Commands::Count { sequence } => {
            println!("{}", editor::counts(&read(&sequence)));
        }
        Commands::Edit { sequence } => {
            let mut editor = Editor::new(read(&sequence), &config);
            editor.run(io::stdin().lock(), io::stdout().lock())?;
            println!("{}", editor.sequence().to_text(separator));
        }
    }

    Ok(())
}

/// Parse a sticker name: a face letter and a facelet index, such as `U4`.
fn parse_sticker(name: &str) -> color_eyre::Result<Sticker> {
    let mut chars = name.trim().chars();
    let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(eyre!("{name:?} is not a sticker name such as U4"));
    };

    let face = Face::ALL
        .into_iter()
        .find(|face| face.letter() == letter)
        .ok_or_else(|| eyre!("{letter:?} is not a face"))?;
    let index = digit
        .to_digit(10)
        .filter(|&index| index < 9)
        .ok_or_else(|| eyre!("{digit:?} is not a facelet index from 0 to 8"))?;

    Ok(Sticker::new(face, index as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticker_names() {
        assert_eq!(parse_sticker("U4").unwrap(), Sticker::center(Face::U));
        assert_eq!(parse_sticker(" B0").unwrap(), Sticker::new(Face::B, 0));
        assert!(parse_sticker("U9").is_err());
        assert!(parse_sticker("X1").is_err());
        assert!(parse_sticker("U12").is_err());
    }

    #[test]
    fn cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["scramble", "-vv", "show", "R U", "--neutral", "D1,D3"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Show { ref neutral, .. } if neutral.len() == 2));
    }
}
