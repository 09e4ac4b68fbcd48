pub mod matrix_view;
pub mod shading;

use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tokio::time::sleep;
use tracing::info;

use crate::{
    display::framebuffer::FrameBuffer,
    frame_loop::FrameLoop,
    sim::random::RandomSource,
};
use matrix_view::MatrixView;
use shading::Shading;

pub async fn run<R: RandomSource>(
    frame_loop: &mut FrameLoop<R, FrameBuffer>,
    shading: Shading,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, frame_loop, shading).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner<R: RandomSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    frame_loop: &mut FrameLoop<R, FrameBuffer>,
    shading: Shading,
) -> Result<()> {
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);

    loop {
        let started = Instant::now();
        frame_loop.step();
        terminal.draw(|frame| render(frame, frame_loop, shading))?;

        let elapsed = i64::try_from(started.elapsed().as_micros()).unwrap_or(i64::MAX);
        let remaining = frame_loop.finish_frame(elapsed);
        let deadline = sleep(Duration::from_micros(u64::try_from(remaining).unwrap_or(0)));
        tokio::pin!(deadline);

        // Input must not shorten the frame, so keep waiting until the
        // deadline unless it asks to quit.
        loop {
            tokio::select! {
                () = &mut deadline => break,
                maybe_input = input_stream.next() => match maybe_input {
                    Some(event) if is_quit(&event) => {
                        info!(frames = frame_loop.stats().frames, "quit requested");
                        return Ok(());
                    }
                    Some(_) => {}
                    None => return Ok(()),
                },
            }
        }
    }
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

#[must_use]
pub fn is_quit(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub fn render<R: RandomSource>(
    frame: &mut Frame,
    frame_loop: &FrameLoop<R, FrameBuffer>,
    shading: Shading,
) {
    let area = frame.area();
    let view = MatrixView::new(frame_loop.display(), shading);
    let (columns, rows) = view.size();
    let needed_width = columns.saturating_add(2);
    let needed_height = rows.saturating_add(2);

    if area.width < needed_width || area.height < needed_height {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {needed_width}x{needed_height}."
        ))
        .block(Block::default().borders(Borders::ALL).title("snowfall"));
        frame.render_widget(warning, area);
        return;
    }

    let sim = frame_loop.simulation();
    let title = format!(
        " snowfall · wind {:+} · flakes {} ",
        sim.wind().wind(),
        sim.particles().active_count()
    );
    let outer = centered_rect(needed_width, needed_height, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let inner = block.inner(outer);
    frame.render_widget(block, outer);
    frame.render_widget(view, inner);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
