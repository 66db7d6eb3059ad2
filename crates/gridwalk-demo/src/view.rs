//! Terminal rendering of a search in progress.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Color, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridwalk_core::Position;
use gridwalk_paths::{GridNode, NodeFlags, SearchEngine, SearchObserver};

/// Three-column glyph and colour for one node.
pub fn glyph(node: &GridNode, flags: NodeFlags, from: Option<Position>) -> (&'static str, Color) {
    if node.is_wall() {
        return ("###", Color::DarkGrey);
    }
    if node.is_occupied() {
        return (" S ", Color::Green);
    }
    if node.is_goal() {
        return (" G ", Color::Red);
    }
    if flags.contains(NodeFlags::PATH) {
        return (" * ", Color::Yellow);
    }
    if flags.contains(NodeFlags::CURRENT) {
        return (" @ ", Color::Magenta);
    }
    if flags.contains(NodeFlags::NEIGHBOUR) {
        return (" + ", Color::Cyan);
    }
    if flags.contains(NodeFlags::FRONTIER) {
        return (" o ", Color::Blue);
    }
    if flags.contains(NodeFlags::CAME_FROM_DIRECTION) {
        if let Some(from) = from {
            // x grows downwards on screen.
            let arrow = match (from.x - node.pos().x, from.y - node.pos().y) {
                (-1, 0) => " ^ ",
                (1, 0) => " v ",
                (0, -1) => " < ",
                (0, 1) => " > ",
                _ => " . ",
            };
            return (arrow, Color::White);
        }
    }
    if flags.contains(NodeFlags::REACHED) {
        return (" . ", Color::White);
    }
    if node.is_real() {
        (" : ", Color::DarkGrey)
    } else {
        ("   ", Color::Reset)
    }
}

/// Plain-text picture of the engine's current state, one line per row.
pub fn render_text(engine: &SearchEngine<'_>) -> String {
    let graph = engine.graph();
    let mut out = String::new();
    for node in graph.nodes() {
        if node.pos().y == 0 && node.pos().x > 0 {
            out.push('\n');
        }
        let pos = node.pos();
        let (g, _) = glyph(node, engine.flags(pos), engine.predecessor(pos));
        out.push_str(g);
    }
    out
}

/// Draws every step into the alternate screen and cancels the search on
/// `q`, `Esc` or `Ctrl-C`.
pub struct TerminalView<W: Write> {
    out: W,
    error: Option<io::Error>,
    closed: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn open(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self {
            out,
            error: None,
            closed: false,
        })
    }

    fn draw(&mut self, engine: &SearchEngine<'_>) -> io::Result<()> {
        let graph = engine.graph();
        for node in graph.nodes() {
            let pos = node.pos();
            let (g, color) = glyph(node, engine.flags(pos), engine.predecessor(pos));
            queue!(
                self.out,
                cursor::MoveTo(pos.y as u16 * 3, pos.x as u16),
                SetForegroundColor(color),
                style::Print(g)
            )?;
        }
        queue!(
            self.out,
            style::ResetColor,
            cursor::MoveTo(0, graph.dims().rows as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(format!(
                "{:?}  steps: {}  (q to cancel)",
                engine.status(),
                engine.steps()
            ))
        )?;
        self.out.flush()
    }

    fn cancel_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                let ctrl_c = code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Block until any key is pressed.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(());
            }
        }
    }

    /// Restore the terminal and report the first drawing error, if any.
    pub fn close(mut self) -> io::Result<()> {
        self.restore();
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn restore(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl<W: Write> SearchObserver for TerminalView<W> {
    fn on_step(&mut self, engine: &SearchEngine<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = self.draw(engine).and_then(|()| self.cancel_requested());
        match result {
            Ok(true) => engine.cancel(),
            Ok(false) => {}
            Err(e) => {
                log::error!("terminal output failed: {e}");
                self.error = Some(e);
                engine.cancel();
            }
        }
    }
}

impl<W: Write> Drop for TerminalView<W> {
    fn drop(&mut self) {
        self.restore();
    }
}
