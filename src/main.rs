use plaza::adapters::{FileSessionStore, MemorySessionStore};
use plaza::api::ApiClient;
use plaza::app::{App, AppContext, AppMessage};
use plaza::cli::{parse_args, run_cli_command, CliCommand, RunOptions};
use plaza::config::ClientConfig;
use plaza::logging::{default_log_path, init_tracing};
use plaza::terminal::{setup_panic_hook, TerminalManager};
use plaza::traits::SessionStore;
use plaza::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Redraw and animation interval.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    let options = match &command {
        CliCommand::RunTui(options) => options.clone(),
        _ => RunOptions::default(),
    };
    let mut config = ClientConfig::from_env();
    if let Some(url) = &options.api_url {
        config = config.with_api_url(url.as_str());
    }

    if let Some(result) = run_cli_command(&command, &config) {
        return result;
    }

    if let Some(path) = default_log_path() {
        init_tracing(&path);
    }
    tracing::info!("Starting plaza against {}", config.api_url);

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    let api = ApiClient::from_config(&config)?;
    let store = session_store(&config);
    let mut app = App::new(AppContext::new(api, store, config));

    runtime.block_on(async {
        if options.demo {
            app.start_demo();
        } else {
            app.start();
        }

        let mut manager = TerminalManager::new()?;
        let result = run_app(manager.terminal(), &mut app).await;
        manager.restore();
        result
    })?;

    tracing::info!("plaza exited");
    Ok(())
}

fn session_store(config: &ClientConfig) -> Arc<dyn SessionStore> {
    match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::at(path)),
        None => {
            tracing::warn!("No home directory; the session will not persist");
            Arc::new(MemorySessionStore::new())
        }
    }
}

/// The UI loop: draw when dirty, then wait for a tick, a key or a result.
async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                    }
                    None => return Ok(()),
                }
            }

            Some(msg) = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }
    }
}
