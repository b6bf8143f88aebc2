use std::io;
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use crate::api::SearchClient;
use crate::search::{ControllerSettings, FetchCommand, NavigationState, SearchStateController};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Runs [`FetchCommand`]s on tokio and posts completions back to the UI loop.
struct Fetcher {
    client: SearchClient,
    handle: Handle,
    tx: Sender<AppEvent>,
}

impl Fetcher {
    fn search(&self, cmd: FetchCommand) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = client.search(&cmd.request).await;
            let _ = tx.send(AppEvent::SearchCompleted {
                request_id: cmd.request_id,
                result,
            });
        });
    }

    fn load_options(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let _ = tx.send(AppEvent::CategoriesLoaded(client.categories().await));
        });

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let _ = tx.send(AppEvent::IngredientsLoaded(client.ingredients().await));
        });
    }
}

pub fn run(
    client: SearchClient,
    settings: ControllerSettings,
    tick_rate: Duration,
    initial: Option<NavigationState>,
) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(tick_rate);
    let fetcher = Fetcher {
        client,
        handle: runtime.handle().clone(),
        tx: events.sender(),
    };

    let mut app = App::new(SearchStateController::new(settings, initial));
    fetcher.load_options();
    app.start();

    loop {
        for cmd in app.take_commands() {
            fetcher.search(cmd);
        }

        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key, Instant::now()),
            Ok(AppEvent::Tick) | Err(RecvTimeoutError::Timeout) => app.on_tick(Instant::now()),
            Ok(AppEvent::Resize(cols, rows)) => {
                tracing::debug!(cols, rows, "Terminal resized");
            }
            Ok(AppEvent::SearchCompleted { request_id, result }) => {
                app.on_search_complete(request_id, result);
            }
            Ok(AppEvent::CategoriesLoaded(result)) => app.on_categories_loaded(result),
            Ok(AppEvent::IngredientsLoaded(result)) => app.on_ingredients_loaded(result),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    runtime.shutdown_timeout(Duration::from_millis(200));
    drop(guard);
    Ok(())
}
