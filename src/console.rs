use owo_colors::{OwoColorize, Style};
use std::io::{self, IsTerminal, Stdout, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Banner,
}

impl Tone {
    fn style(self, bold: bool) -> Style {
        let style = match self {
            Tone::Info => Style::new().blue(),
            Tone::Success => Style::new().green(),
            Tone::Warning => Style::new().yellow(),
            Tone::Error => Style::new().red(),
            Tone::Banner => Style::new().cyan(),
        };

        if bold {
            style.bold()
        } else {
            style
        }
    }
}

/// Line-oriented output sink. Styling is dropped entirely when color is off.
#[derive(Debug)]
pub struct Console<W> {
    out: W,
    color: bool,
}

impl Console<Stdout> {
    pub fn stdout(no_color: bool) -> Self {
        let out = io::stdout();
        let color = !no_color && out.is_terminal();
        Self::new(out, color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", text.as_ref())
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn styled(&mut self, tone: Tone, text: impl AsRef<str>) -> io::Result<()> {
        self.write_styled(tone, false, text.as_ref())
    }

    pub fn emphasized(&mut self, tone: Tone, text: impl AsRef<str>) -> io::Result<()> {
        self.write_styled(tone, true, text.as_ref())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_styled(&mut self, tone: Tone, bold: bool, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", text.style(tone.style(bold)))
        } else {
            writeln!(self.out, "{}", text)
        }
    }
}
