use anyhow::Result;

mod app;
mod assistant;
mod config;
mod handler;
mod health;
mod language;
mod tui;
mod ui;

use app::App;
use config::Config;
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    tui::install_panic_hook();

    let config = Config::load().unwrap_or_else(|_| Config::new());

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(config);

    let result = run(&mut terminal, &mut events, &mut app).await;

    app.shutdown();
    tui::restore()?;

    result
}

async fn run(terminal: &mut tui::Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event)?;
        }

        // Collect a finished reply, if any, before the next draw
        app.poll_reply().await;
    }

    Ok(())
}
