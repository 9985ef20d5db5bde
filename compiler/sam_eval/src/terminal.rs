//! ANSI escape sequences and box-drawing glyphs.

pub const CLEAR: &str = "\x1b[2J";
pub const HOME: &str = "\x1b[H";

/// Cursor movement direction for `UP`, `DOWN`, `LEFT` and `RIGHT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    fn code(self) -> char {
        match self {
            Direction::Up => 'A',
            Direction::Down => 'B',
            Direction::Right => 'C',
            Direction::Left => 'D',
        }
    }
}

pub fn cursor_move(direction: Direction, count: i64) -> String {
    format!("\x1b[{count}{}", direction.code())
}

/// Move to column `x`, row `y`.
pub fn cursor_to(x: i64, y: i64) -> String {
    format!("\x1b[{y};{x}H")
}

/// Select Graphic Rendition with a single parameter.
pub fn sgr(code: i64) -> String {
    format!("\x1b[{code}m")
}

const COLOR_NAMES: [&str; 9] = [
    "BLACK", "RED", "GREEN", "YELLOW", "BLUE", "MAGENTA", "CYAN", "WHITE", "DEFAULT",
];

/// SGR code for a named color, foreground or background.
pub fn named_color(name: &str, background: bool) -> Option<i64> {
    let index = COLOR_NAMES.iter().position(|&known| known == name)?;
    // DEFAULT skips the unused slot 8.
    let offset = if index == 8 { 9 } else { index as i64 };
    let base = if background { 40 } else { 30 };
    Some(base + offset)
}

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

#[derive(Copy, Clone)]
enum Weight {
    Light,
    Heavy,
    Double,
}

/// Look up the glyph for a `LINE` descriptor.
///
/// Descriptors are block names (`FULL`, `LIGHT`, ...) or a set of the
/// direction letters `U`, `D`, `L`, `R` in any order, optionally prefixed
/// by `H` (heavy) or `=` (double). Whitespace is ignored.
pub fn glyph(descriptor: &str) -> Option<char> {
    let descriptor: String = descriptor.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(block) = block_glyph(&descriptor) {
        return Some(block);
    }

    let (weight, letters) = if let Some(rest) = descriptor.strip_prefix('H') {
        (Weight::Heavy, rest)
    } else if let Some(rest) = descriptor.strip_prefix('=') {
        (Weight::Double, rest)
    } else {
        (Weight::Light, descriptor.as_str())
    };

    let mut mask = 0u8;
    for letter in letters.chars() {
        let bit = match letter {
            'U' => UP,
            'D' => DOWN,
            'L' => LEFT,
            'R' => RIGHT,
            _ => return None,
        };
        if mask & bit != 0 {
            return None;
        }
        mask |= bit;
    }
    box_glyph(mask, weight)
}

fn block_glyph(name: &str) -> Option<char> {
    Some(match name {
        "FULL" => '█',
        "UPPER" => '▀',
        "LOWER" => '▄',
        "LEFTHALF" => '▌',
        "RIGHTHALF" => '▐',
        "LIGHT" => '░',
        "MEDIUM" => '▒',
        "DARK" => '▓',
        _ => return None,
    })
}

fn box_glyph(mask: u8, weight: Weight) -> Option<char> {
    // [light, heavy, double]
    let glyphs = match mask {
        m if m == LEFT | RIGHT => ['─', '━', '═'],
        m if m == UP | DOWN => ['│', '┃', '║'],
        m if m == DOWN | RIGHT => ['┌', '┏', '╔'],
        m if m == DOWN | LEFT => ['┐', '┓', '╗'],
        m if m == UP | RIGHT => ['└', '┗', '╚'],
        m if m == UP | LEFT => ['┘', '┛', '╝'],
        m if m == UP | DOWN | RIGHT => ['├', '┣', '╠'],
        m if m == UP | DOWN | LEFT => ['┤', '┫', '╣'],
        m if m == DOWN | LEFT | RIGHT => ['┬', '┳', '╦'],
        m if m == UP | LEFT | RIGHT => ['┴', '┻', '╩'],
        m if m == UP | DOWN | LEFT | RIGHT => ['┼', '╋', '╬'],
        _ => return None,
    };
    Some(match weight {
        Weight::Light => glyphs[0],
        Weight::Heavy => glyphs[1],
        Weight::Double => glyphs[2],
    })
}
