use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use susan::{
    api::OllamaClient,
    app::{App, ReplyEvent},
    chat_view::draw_chat,
    config::Config,
    key_handlers::handle_chat_input,
};
use tokio::sync::mpsc;

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let client = Arc::new(OllamaClient::new(config));
    info!(
        "talking to {} (model: {})",
        client.base_url(),
        client.model()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new();
    let res = run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: Arc<OllamaClient>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel::<Event>(100);
    let (reply_tx, mut reply_rx) = mpsc::channel::<ReplyEvent>(100);

    // Read terminal input off the main loop.
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if event_tx.send(Event::Input(ev)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(100) {
                if event_tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        terminal.draw(|f| draw_chat(f, &mut app))?;

        tokio::select! {
            Some(event) = event_rx.recv() => {
                match event {
                    Event::Input(CEvent::Key(key)) => {
                        handle_chat_input(key, &mut app, &client, &reply_tx);
                    }
                    Event::Input(_) => {}
                    Event::Tick => {}
                }
            }
            Some(reply) = reply_rx.recv() => {
                app.apply_reply(reply);
            }
            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
