//! Text to token conversion.
//!
//! Both entry points are best effort and never fail. Input they cannot read is
//! dropped, so the result may hold fewer tokens than the text suggests.

use log::{debug, trace, warn};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;

use crate::{
    sequence::ScrambleSequence,
    step::{Compound, Layer, Movement, Step, Turn, Width},
};

#[derive(Parser)]
#[grammar = "./notation.pest"]
struct NotationParser;

/// Read whitespace-separated words, one turn per word with optional group
/// openers before it and closers after it (`(R`, `U)3`, `)2`). A malformed
/// word is skipped as a whole.
#[must_use]
pub fn parse_strict(text: &str) -> ScrambleSequence {
    let mut steps = Vec::new();

    for word in text.split_whitespace() {
        match NotationParser::parse(Rule::word, word) {
            Ok(mut pairs) => {
                let word_pair = pairs.next().expect("a successful parse yields the word");
                steps.extend(word_pair.into_inner().filter_map(step_from_pair));
            }
            Err(_) => debug!("Skipping unrecognized word {word:?}"),
        }
    }

    ScrambleSequence::from(steps)
}

/// Pick out every recognizable token anywhere in `text`. At each position the
/// longest token is taken; where nothing matches, one character is skipped.
#[must_use]
pub fn parse_lenient(text: &str) -> ScrambleSequence {
    let pairs = match NotationParser::parse(Rule::lenient, text) {
        Ok(mut pairs) => pairs.next().expect("a successful parse yields the text"),
        Err(e) => {
            warn!("Lenient parse rejected its input: {e}");
            return ScrambleSequence::new();
        }
    };

    let sequence = ScrambleSequence::from(pairs.into_inner().filter_map(step_from_pair).collect::<Vec<_>>());
    trace!("Lenient parse of {} chars found {} tokens", text.chars().count(), sequence.len());
    sequence
}

/// Parse exactly one token.
pub(crate) fn parse_step(text: &str) -> Option<Step> {
    let mut pairs = NotationParser::parse(Rule::step, text).ok()?;
    pairs.next()?.into_inner().find_map(step_from_pair)
}

fn step_from_pair(pair: Pair<'_, Rule>) -> Option<Step> {
    match pair.as_rule() {
        Rule::open => Some(Step::OpenGroup),
        Rule::close => {
            let repeat = pair
                .into_inner()
                .next()
                .and_then(|repeat| repeat.as_str().chars().next()?.to_digit(10))
                .map_or(1, |digit| digit as u8);
            Step::close_group_with_repeat(repeat)
        }
        Rule::face_turn | Rule::slice_turn | Rule::rotation_turn => {
            Some(Step::Turn(turn_from_pair(pair)))
        }
        Rule::EOI => None,
        rule => unreachable!("{rule:?}, {}", pair.as_str()),
    }
}

fn turn_from_pair(pair: Pair<'_, Rule>) -> Turn {
    let mut pairs = pair.into_inner();

    let letter = pairs.next().expect("every turn starts with a layer letter");
    let layer = Layer::ALL
        .into_iter()
        .find(|layer| letter.as_str().starts_with(layer.letter()))
        .unwrap_or_else(|| unreachable!("{} is not a layer letter", letter.as_str()));

    let mut movement = Movement::Cw;
    let mut width = Width::Single;
    let mut compound = None;

    for pair in pairs {
        match pair.as_rule() {
            Rule::wide => width = Width::Wide,
            Rule::whole => width = Width::Whole,
            Rule::sync => compound = Some(Compound::Slice),
            Rule::anti => compound = Some(Compound::AntiSlice),
            Rule::half => movement = Movement::Half,
            Rule::prime => movement = Movement::Ccw,
            rule => unreachable!("{rule:?}, {}", pair.as_str()),
        }
    }

    match (layer.face(), compound) {
        (Some(face), Some(compound)) => Turn::compound(face, compound, movement),
        (Some(face), None) => Turn::face(face, movement, width),
        (None, _) => Turn::new(layer, movement),
    }
}
