//! ANSI console text to styled markup.
//!
//! SGR sequences (`ESC [ ... m`) become `<span style="...">` runs; every other
//! escape sequence is dropped. Source text is escaped before any styling is applied,
//! and newlines become `<br/>`.

use crate::{
    foundation::{markup::escape_html, mime::CONSOLE_TEXT},
    model::artifact::Artifact,
};

pub const MIMETYPES: &[&str] = &[CONSOLE_TEXT];

pub fn transform(data: &str) -> Artifact {
    Artifact::ConsoleText {
        html: ansi_to_html(data),
    }
}

/// The 16 base colors (normal then bright).
const BASE_COLORS: [&str; 16] = [
    "#000", "#A00", "#0A0", "#A50", "#00A", "#A0A", "#0AA", "#AAA", "#555", "#F55", "#5F5",
    "#FF5", "#55F", "#F5F", "#5FF", "#FFF",
];

const DEFAULT_FG: Color = Color::Palette(15);
const DEFAULT_BG: Color = Color::Palette(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Palette(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    fn css(self) -> String {
        match self {
            Self::Palette(i) if i < 16 => BASE_COLORS[usize::from(i)].to_owned(),
            Self::Palette(i) if i < 232 => {
                let n = i - 16;
                let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
                hex(level(n / 36), level((n / 6) % 6), level(n % 6))
            }
            Self::Palette(i) => {
                let v = (i - 232) * 10 + 8;
                hex(v, v, v)
            }
            Self::Rgb(r, g, b) => hex(r, g, b),
        }
    }
}

fn hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    faint: bool,
    italic: bool,
    underline: bool,
    inverse: bool,
}

impl Style {
    fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    fn css(&self) -> String {
        let (fg, bg) = if self.inverse {
            (
                Some(self.bg.unwrap_or(DEFAULT_BG)),
                Some(self.fg.unwrap_or(DEFAULT_FG)),
            )
        } else {
            (self.fg, self.bg)
        };

        let mut decls = Vec::new();
        if let Some(c) = fg {
            decls.push(format!("color:{}", c.css()));
        }
        if let Some(c) = bg {
            decls.push(format!("background-color:{}", c.css()));
        }
        if self.bold {
            decls.push("font-weight:bold".to_owned());
        }
        if self.faint {
            decls.push("opacity:0.5".to_owned());
        }
        if self.italic {
            decls.push("font-style:italic".to_owned());
        }
        if self.underline {
            decls.push("text-decoration:underline".to_owned());
        }
        decls.join(";")
    }

    fn apply_sgr(&mut self, params: &[u16]) {
        if params.is_empty() {
            *self = Self::default();
            return;
        }

        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => *self = Self::default(),
                1 => self.bold = true,
                2 => self.faint = true,
                3 => self.italic = true,
                4 => self.underline = true,
                7 => self.inverse = true,
                21 | 22 => {
                    self.bold = false;
                    self.faint = false;
                }
                23 => self.italic = false,
                24 => self.underline = false,
                27 => self.inverse = false,
                p @ 30..=37 => self.fg = Some(Color::Palette((p - 30) as u8)),
                39 => self.fg = None,
                p @ 40..=47 => self.bg = Some(Color::Palette((p - 40) as u8)),
                49 => self.bg = None,
                p @ 90..=97 => self.fg = Some(Color::Palette((p - 90 + 8) as u8)),
                p @ 100..=107 => self.bg = Some(Color::Palette((p - 100 + 8) as u8)),
                p @ (38 | 48) => {
                    let (color, consumed) = extended_color(&params[i + 1..]);
                    if let Some(color) = color {
                        if p == 38 {
                            self.fg = Some(color);
                        } else {
                            self.bg = Some(color);
                        }
                    }
                    i += consumed;
                }
                _ => {}
            }
            i += 1;
        }
    }
}

/// Parse the tail of a `38`/`48` sequence. Returns the color (if valid) and how many
/// parameters were consumed.
fn extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    let channel = |v: u16| u8::try_from(v).ok();
    match rest {
        [5, idx, ..] => (channel(*idx).map(Color::Palette), 2),
        [2, r, g, b, ..] => {
            let rgb = channel(*r)
                .zip(channel(*g))
                .zip(channel(*b))
                .map(|((r, g), b)| Color::Rgb(r, g, b));
            (rgb, 4)
        }
        [5] | [2, ..] => (None, rest.len()),
        _ => (None, 0),
    }
}

/// Convert ANSI-escaped console output to HTML.
pub fn ansi_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut style = Style::default();
    let mut written = Style::default();
    let mut span_open = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    let mut body = String::new();
                    let mut fin = None;
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            fin = Some(c);
                            break;
                        }
                        body.push(c);
                    }
                    if fin == Some('m') {
                        style.apply_sgr(&sgr_params(&body));
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some('(' | ')' | '*' | '+') => {
                    chars.next();
                    chars.next();
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }

        if c == '\r' || (c.is_control() && c != '\n' && c != '\t') {
            continue;
        }

        if style != written {
            if span_open {
                out.push_str("</span>");
                span_open = false;
            }
            if !style.is_plain() {
                out.push_str(&format!("<span style=\"{}\">", style.css()));
                span_open = true;
            }
            written = style;
        }

        if c == '\n' {
            out.push_str("<br/>");
        } else {
            out.push_str(&escape_html(c.encode_utf8(&mut [0u8; 4])));
        }
    }

    if span_open {
        out.push_str("</span>");
    }
    out
}

/// Split an SGR parameter string; empty fields count as `0`, unparsable fields are dropped.
fn sgr_params(body: &str) -> Vec<u16> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split([';', ':'])
        .filter_map(|p| {
            if p.is_empty() {
                Some(0)
            } else {
                p.parse::<u16>().ok()
            }
        })
        .collect()
}
