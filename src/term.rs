use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

#[derive(Copy, Clone, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> TermCoords {
        (self.width, self.height)
    }

    /// Draws a frame whose outer corners are `top_left` and `top_left + size - 1`.
    pub fn draw_borders(&mut self, top_left: TermCoords, size: TermCoords) -> crossterm::Result<()> {
        let (width, height) = size;
        let (x0, y0) = top_left;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            self.print_at((x, y0), ch, Color::Reset)?;
            self.print_at((x, end_y), ch, Color::Reset)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|', Color::Reset)?;
            self.print_at((end_x, y), '|', Color::Reset)?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Blank rows above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> crossterm::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Put back whatever the message covered
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(glyph) = self.glyph_at((x, y)) {
                    self.queue_glyph((x, y), glyph)?;
                }
            }
        }

        self.flush()
    }

    /// Writes a cell unless the screen already shows exactly that.
    pub fn print_at(&mut self, pos: TermCoords, ch: char, color: Color) -> crossterm::Result<()> {
        let glyph = Glyph { ch, color };
        let idx = match self.index(pos) {
            Some(idx) => idx,
            None => return Ok(()),
        };

        if self.screen[idx] == glyph {
            return Ok(());
        }

        self.screen[idx] = glyph;
        self.queue_glyph(pos, glyph)
    }

    pub fn print_str_at(&mut self, pos: TermCoords, text: &str) -> crossterm::Result<()> {
        for (x_diff, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + x_diff as TermInt, pos.1), ch, Color::Reset)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: TermCoords) -> Option<usize> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return None;
        }
        Some(self.width as usize * pos.1 as usize + pos.0 as usize)
    }

    fn glyph_at(&self, pos: TermCoords) -> Option<Glyph> {
        self.index(pos).map(|idx| self.screen[idx])
    }

    fn queue_glyph(&mut self, pos: TermCoords, glyph: Glyph) -> crossterm::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(glyph.color),
            style::Print(glyph.ch)
        )
    }

    fn print_at_no_save(&mut self, pos: TermCoords, ch: char) -> crossterm::Result<()> {
        // Messages skip the local buffer so hiding them can restore what was underneath
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(Color::Reset),
            style::Print(ch)
        )
    }

    fn set_raw_mode(&self, option: bool) -> crossterm::Result<()> {
        if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }

    fn set_cursor_blink(&mut self, option: bool) -> crossterm::Result<()> {
        if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        }
    }

    fn set_cursor_visibility(&mut self, option: bool) -> crossterm::Result<()> {
        if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        }
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: TermCoords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> TermCoords {
        self.top_left
    }
}
