//! Line-oriented sequence editor.

use std::{
    io::{BufRead, Write},
    ops::Range,
};

use color_eyre::eyre::{OptionExt, eyre};
use itertools::Itertools;
use log::{debug, info};
use scramble_core::{
    CubeState, Metric, ScrambleSequence, SequenceError, Step, Turn, parser::parse_lenient,
};

use crate::{config::Config, history::EditHistory, net};

const HELP: &str = "\
add <moves>           append moves
paste <text>          append every move found in arbitrary text
ins <pos> <token>     insert a token before position <pos>
del <pos>             delete the token at <pos>
pop                   delete the last token
slice <start> <n>     show <n> tokens starting at <start>
close                 close every open group
shrink                merge adjacent turns
simplify [a b]        merge turns, letting same-axis turns pass each other
reverse [a b]         reverse the order of tokens
invert [a b]          invert every turn in place
inverse               replace the sequence with its inverse
develop [keep]        expand repeated groups; `keep` keeps groups done once
unrotate              remove whole-cube rotations
basic                 expand wide, whole-layer and compound turns
conj <rot> [a b]      conjugate by a rotation such as x, y' or z2
undo / redo           step through the edit history
show / net / count    print the sequence, its cube or its move counts
clear                 start over
quit                  leave";

pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Editor {
    sequence: ScrambleSequence,
    history: EditHistory,
    separator: String,
    color: bool,
}

impl Editor {
    #[must_use]
    pub fn new(sequence: ScrambleSequence, config: &Config) -> Editor {
        Editor {
            sequence,
            history: EditHistory::new(config.editor.history_depth),
            separator: config.editor.separator.clone(),
            color: config.display.color,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &ScrambleSequence {
        &self.sequence
    }

    /// Read commands until `quit` or the end of the input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> color_eyre::Result<()> {
        writeln!(output, "{}", self.describe())?;

        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Outcome::Continue(message)) => writeln!(output, "{message}")?,
                Ok(Outcome::Quit) => break,
                Err(e) => writeln!(output, "error: {e}")?,
            }
        }

        Ok(())
    }

    pub fn execute(&mut self, line: &str) -> color_eyre::Result<Outcome> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = rest.split_whitespace().collect_vec();
        debug!("Editor command {command:?} with {args:?}");

        match command {
            "" | "show" => {}
            "help" => return Ok(Outcome::Continue(HELP.to_owned())),
            "quit" | "exit" => return Ok(Outcome::Quit),
            "add" => {
                let added = ScrambleSequence::from_text_with(rest, &self.separator);
                if added.is_empty() {
                    return Err(eyre!("No moves in {rest:?}"));
                }
                self.edit(|sequence| {
                    sequence.append(&added);
                    Ok(())
                })?;
            }
            "paste" => {
                let added = parse_lenient(rest);
                self.edit(|sequence| {
                    sequence.append(&added);
                    Ok(())
                })?;
            }
            "ins" => {
                let [pos, token] = args[..] else {
                    return Err(eyre!("Usage: ins <pos> <token>"));
                };
                let pos = pos.parse::<usize>()?;
                let step = token.parse::<Step>()?;
                self.edit(|sequence| sequence.insert(step, pos))?;
            }
            "del" => {
                let [pos] = args[..] else {
                    return Err(eyre!("Usage: del <pos>"));
                };
                let pos = pos.parse::<usize>()?;
                self.edit(|sequence| sequence.delete(pos).map(|_| ()))?;
            }
            "pop" => {
                if self.sequence.is_empty() {
                    return Err(eyre!("The sequence is empty"));
                }
                self.edit(|sequence| {
                    sequence.delete_last();
                    Ok(())
                })?;
            }
            "slice" => {
                let [start, count] = args[..] else {
                    return Err(eyre!("Usage: slice <start> <count>"));
                };
                let excerpt = self.sequence.slice(start.parse()?, count.parse()?)?;
                let balance = if excerpt.are_parentheses_ok() {
                    "balanced"
                } else {
                    "unbalanced"
                };
                return Ok(Outcome::Continue(format!(
                    "{} ({balance})",
                    excerpt.to_text(&self.separator)
                )));
            }
            "close" => self.edit(|sequence| {
                sequence.complete_groups();
                Ok(())
            })?,
            "shrink" => self.edit(|sequence| {
                sequence.shrink();
                Ok(())
            })?,
            "simplify" => {
                let range = self.range(&args)?;
                self.edit(|sequence| sequence.simplify(range).map(|_| ()))?;
            }
            "reverse" => {
                let range = self.range(&args)?;
                self.edit(|sequence| sequence.reverse(range))?;
            }
            "invert" => {
                let range = self.range(&args)?;
                self.edit(|sequence| sequence.invert(range))?;
            }
            "inverse" => self.edit(ScrambleSequence::inverse_and_reverse)?,
            "develop" => {
                let flatten_single = args.first() != Some(&"keep");
                self.edit(|sequence| sequence.develop_groups(flatten_single))?;
            }
            "unrotate" => self.edit(|sequence| sequence.remove_turns().map(|_| ()))?,
            "basic" => self.edit(|sequence| {
                sequence.to_basic_steps();
                Ok(())
            })?,
            "conj" => {
                let (rotation, bounds) = args
                    .split_first()
                    .ok_or_eyre("Usage: conj <rotation> [start end]")?;
                let rotation = parse_rotation(rotation)?;
                let range = self.range(bounds)?;
                self.edit(|sequence| {
                    sequence.apply_turn(rotation.layer().axis(), rotation.movement(), range)
                })?;
            }
            "undo" => {
                let current = self.sequence.clone();
                self.sequence = self.history.undo(current).ok_or_eyre("Nothing to undo")?;
            }
            "redo" => {
                let current = self.sequence.clone();
                self.sequence = self.history.redo(current).ok_or_eyre("Nothing to redo")?;
            }
            "net" => {
                let mut state = CubeState::new();
                state.apply_developed(&self.sequence)?;
                return Ok(Outcome::Continue(net::render(&state, self.color)));
            }
            "count" => return Ok(Outcome::Continue(counts(&self.sequence))),
            "clear" => self.edit(|sequence| {
                *sequence = ScrambleSequence::new();
                Ok(())
            })?,
            other => return Err(eyre!("Unknown command {other:?}, try `help`")),
        }

        Ok(Outcome::Continue(self.describe()))
    }

    /// Run `f` on a copy of the sequence, keeping the result only on success.
    fn edit(
        &mut self,
        f: impl FnOnce(&mut ScrambleSequence) -> Result<(), SequenceError>,
    ) -> color_eyre::Result<()> {
        let mut edited = self.sequence.clone();
        f(&mut edited)?;

        if edited != self.sequence {
            let previous = std::mem::replace(&mut self.sequence, edited);
            self.history.record(previous);
            info!("Sequence is now {}", self.sequence);
        }

        Ok(())
    }

    fn range(&self, args: &[&str]) -> color_eyre::Result<Range<usize>> {
        match args {
            [] => Ok(0..self.sequence.len()),
            [start, end] => Ok(start.parse()?..end.parse()?),
            _ => Err(eyre!("Give a range as two positions: <start> <end>")),
        }
    }

    fn describe(&self) -> String {
        let depth = self.sequence.nest_value();
        let open = if depth > 0 {
            format!("  [{depth} open]")
        } else {
            String::new()
        };
        format!("{}{open}", self.sequence.to_text(&self.separator))
    }
}

/// Parse a whole-cube rotation such as `x'` or `Rc2`.
pub fn parse_rotation(text: &str) -> color_eyre::Result<Turn> {
    let turn = text.parse::<Turn>()?;
    if !turn.is_rotation() {
        return Err(eyre!("{text} is not a whole-cube rotation"));
    }

    let basic = turn.equivalent_basic_turns();
    let [rotation] = basic[..] else {
        unreachable!("a rotation expands to one turn")
    };
    Ok(rotation)
}

#[must_use]
pub fn counts(sequence: &ScrambleSequence) -> String {
    Metric::ALL
        .iter()
        .map(|&metric| format!("{metric}: {}", sequence.move_count(metric)))
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(text: &str) -> Editor {
        Editor::new(ScrambleSequence::from_text(text), &Config::default())
    }

    fn run(editor: &mut Editor, line: &str) -> String {
        match editor.execute(line).unwrap() {
            Outcome::Continue(message) => message,
            Outcome::Quit => panic!("{line} quit the editor"),
        }
    }

    #[test_log::test]
    fn edits_and_undo() {
        let mut editor = editor("R U");
        assert_eq!(run(&mut editor, "ins 0 ("), "(R U  [1 open]");
        assert_eq!(run(&mut editor, "add )3 F'"), "(R U)3 F'");
        assert_eq!(run(&mut editor, "inverse"), "F (U' R')3");
        assert_eq!(run(&mut editor, "undo"), "(R U)3 F'");
        assert_eq!(run(&mut editor, "undo"), "(R U  [1 open]");
        assert_eq!(run(&mut editor, "redo"), "(R U)3 F'");
        assert_eq!(run(&mut editor, "develop"), "R U R U R U F'");
        assert_eq!(run(&mut editor, "count"), "HTM: 7  QTM: 7  STM: 7  ETM: 7");
    }

    #[test_log::test]
    fn failures_keep_the_sequence() {
        let mut editor = editor("(R U");
        assert!(editor.execute("reverse").is_err());
        assert!(editor.execute("del 7").is_err());
        assert!(editor.execute("ins 1 Q").is_err());
        assert!(editor.execute("conj R").is_err());
        assert!(editor.execute("frobnicate").is_err());
        assert!(editor.execute("undo").is_err());
        assert_eq!(editor.sequence().to_string(), "(R U");

        assert_eq!(run(&mut editor, "close"), "(R U)");
        assert_eq!(run(&mut editor, "slice 0 2"), "(R (unbalanced)");
    }

    #[test_log::test]
    fn rotations_and_ranges() {
        let mut editor = editor("x U R y F");
        assert_eq!(run(&mut editor, "unrotate"), "F R R");
        assert_eq!(run(&mut editor, "conj y' 1 3"), "F F F");
        assert_eq!(run(&mut editor, "simplify"), "F'");
        assert_eq!(run(&mut editor, "paste 1. Rw, 2. Lc'"), "F' Rw Lc'");
        assert_eq!(run(&mut editor, "basic"), "F' R M' x");
        assert!(matches!(editor.execute("quit").unwrap(), Outcome::Quit));
    }

    #[test_log::test]
    fn printed_text_can_be_added_back() {
        let mut config = Config::default();
        config.editor.separator = ", ".to_owned();
        let mut editor = Editor::new(ScrambleSequence::new(), &config);

        assert_eq!(run(&mut editor, "add (R U)3 F'"), "(R, U)3, F'");
        assert_eq!(run(&mut editor, "add (R, U)3, F'"), "(R, U)3, F', (R, U)3, F'");
    }

    #[test]
    fn rotation_names() {
        assert_eq!(parse_rotation("Lc").unwrap().to_string(), "x'");
        assert_eq!(parse_rotation("y2").unwrap().to_string(), "y2");
        assert!(parse_rotation("M").is_err());
    }

    #[test]
    fn run_reads_until_quit() {
        let mut editor = editor("R");
        let mut output = vec![];
        editor
            .run("add U\nbogus\nquit\nadd F\n".as_bytes(), &mut output)
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output.lines().collect_vec(),
            ["R", "R U", "error: Unknown command \"bogus\", try `help`"]
        );
        assert_eq!(editor.sequence().to_string(), "R U");
    }
}
