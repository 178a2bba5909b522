use owo_colors::OwoColorize;
use scramble_core::{Color, CubeState, Face, Sticker};

/// Faces of the unfolded cube, row by row. `None` is blank space.
const LAYOUT: [[Option<Face>; 4]; 3] = [
    [None, Some(Face::U), None, None],
    [Some(Face::L), Some(Face::F), Some(Face::R), Some(Face::B)],
    [None, Some(Face::D), None, None],
];

/// Draw the cube as an unfolded net, one character pair per sticker.
#[must_use]
pub fn render(state: &CubeState, color: bool) -> String {
    let mut out = String::new();

    for faces in LAYOUT {
        for row in 0..3 {
            let mut line = String::new();
            for face in faces {
                match face {
                    Some(face) => {
                        for col in 0..3 {
                            let slot = Sticker::new(face, row * 3 + col);
                            line.push_str(&cell(state.color_at(slot), color));
                        }
                    }
                    None => line.push_str("      "),
                }
                line.push(' ');
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out
}

fn cell(sticker: Color, color: bool) -> String {
    let letter = match sticker {
        Color::White => "W",
        Color::Yellow => "Y",
        Color::Green => "G",
        Color::Blue => "B",
        Color::Red => "R",
        Color::Orange => "O",
        Color::Neutral => ".",
    };

    if !color {
        return format!("{letter} ");
    }

    let square = "■ ";
    match sticker {
        Color::White => square.white().to_string(),
        Color::Yellow => square.yellow().to_string(),
        Color::Green => square.green().to_string(),
        Color::Blue => square.blue().to_string(),
        Color::Red => square.red().to_string(),
        Color::Orange => square.truecolor(255, 140, 0).to_string(),
        Color::Neutral => square.bright_black().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use scramble_core::ScrambleSequence;

    use super::*;

    #[test]
    fn solved_net() {
        let net = render(&CubeState::new(), false);
        let lines = net.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 9);
        assert!(net.ends_with("Y Y Y\n"));
        assert_eq!(lines[0], "       W W W");
        assert_eq!(lines[4], "O O O  G G G  R R R  B B B");
        assert_eq!(lines[8], "       Y Y Y");
    }

    #[test]
    fn r_turn_net() {
        let mut state = CubeState::new();
        state.apply_scramble(&ScrambleSequence::from_text("R"));
        let net = render(&state, false);
        let lines = net.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "       W W G");
        assert_eq!(lines[3], "O O O  G G Y  R R R  W B B");
    }
}
