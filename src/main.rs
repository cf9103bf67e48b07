//! TraceChain TUI: terminal viewer for tamper-evident supply-chain lots.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use tracechain_tui::api::ApiClient;
use tracechain_tui::domain::{Action, App, QrArtifact};
use tracechain_tui::ui;

/// TraceChain TUI: browse lot ledgers from a TraceChain backend
#[derive(Parser, Debug)]
#[command(name = "tracechain-tui")]
#[command(about = "Terminal viewer for Smart Farm TraceChain lot ledgers")]
struct Args {
    /// TraceChain backend base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    endpoint: String,

    /// Rows per page in the lot listing
    #[arg(short, long, default_value = "10")]
    page_size: u32,

    /// Write tracing output to this file (stderr would corrupt the screen)
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let client = match ApiClient::new(&args.endpoint) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new(args.page_size)));

    // Initial view mount fetches the first listing page.
    {
        app.lock().await.search.loading = true;
        dispatch(Action::Search, &client, &app);
    }

    let result = run_app(&mut terminal, client, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: Arc<ApiClient>,
    app: Arc<Mutex<App>>,
) -> io::Result<()> {
    loop {
        // Draw UI
        {
            let mut app_guard = app.lock().await;
            app_guard.tick();
            terminal.draw(|frame| {
                ui::render(frame, &app_guard);
            })?;
        }

        // Handle input with a short poll so async updates keep painting
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = app.lock().await.handle_key(key);
                    dispatch(action, &client, &app);
                }
            }
        }

        if app.lock().await.should_quit() {
            return Ok(());
        }
    }
}

/// Dispatch a keyboard-initiated action. Network work goes onto its own
/// task; completions lock the app once and apply their result, so whichever
/// response lands last owns the visible state.
fn dispatch(action: Action, client: &Arc<ApiClient>, app: &Arc<Mutex<App>>) {
    match action {
        Action::None | Action::Quit => {}
        Action::LoadLot(lot_id) => {
            let (client, app) = (client.clone(), app.clone());
            tokio::spawn(async move { load_lot(&client, &app, &lot_id).await });
        }
        Action::Search => {
            let (client, app) = (client.clone(), app.clone());
            tokio::spawn(async move { run_search(&client, &app).await });
        }
        Action::SeedOne => {
            let (client, app) = (client.clone(), app.clone());
            tokio::spawn(async move { seed_one(&client, &app).await });
        }
        Action::SeedMany => {
            let (client, app) = (client.clone(), app.clone());
            tokio::spawn(async move { seed_many(&client, &app).await });
        }
        Action::ShowQr(lot_id) => {
            let (client, app) = (client.clone(), app.clone());
            tokio::spawn(async move { show_qr(&client, &app, &lot_id).await });
        }
        // Clipboard copy is synchronous and non-fatal.
        Action::Copy(value) => {
            let app = app.clone();
            tokio::spawn(async move {
                let mut app = app.lock().await;
                match ui::clipboard::copy(&value) {
                    Ok(()) => app.mark_copied(),
                    Err(e) => app.set_notice(e.to_string()),
                }
            });
        }
    }
}

async fn load_lot(client: &ApiClient, app: &Mutex<App>, lot_id: &str) {
    match client.lot_summary(lot_id).await {
        Ok(summary) => app.lock().await.apply_lot_loaded(summary),
        Err(e) => {
            tracing::warn!(lot_id, error = %e, "lot load failed");
            app.lock().await.apply_lot_failed(&e.message);
        }
    }
}

async fn run_search(client: &ApiClient, app: &Mutex<App>) {
    let (query, page, page_size) = {
        let app = app.lock().await;
        (
            app.search.query.trim().to_string(),
            app.search.page,
            app.search.page_size,
        )
    };

    match client.search_lots(&query, page, page_size).await {
        Ok(items) => app.lock().await.apply_search_results(items),
        Err(e) => {
            tracing::warn!(query, page, error = %e, "lot search failed");
            app.lock().await.apply_search_failed(&e.message);
        }
    }
}

async fn show_qr(client: &ApiClient, app: &Mutex<App>, lot_id: &str) {
    match client.lot_qrcode(lot_id).await {
        Ok(image) => match QrArtifact::new(lot_id, &image.content_type, &image.bytes) {
            Ok(artifact) => app.lock().await.apply_qr_ready(artifact),
            Err(e) => app.lock().await.apply_qr_failed(&e.to_string()),
        },
        Err(e) => {
            tracing::warn!(lot_id, error = %e, "QR fetch failed");
            app.lock().await.apply_qr_failed(&e.message);
        }
    }
}

/// Seed one demo lot, then refresh the listing and load the resulting lot.
async fn seed_one(client: &ApiClient, app: &Mutex<App>) {
    match client.seed().await {
        Ok(outcome) => {
            // The seed endpoint may answer without a lot id; the demo lot id
            // is stable.
            let lot_id = outcome.lot_id.unwrap_or_else(|| "LOT-001".to_string());
            {
                let mut app = app.lock().await;
                app.apply_seed_done();
                app.input = lot_id.clone();
                app.detail.begin_load(&lot_id);
                app.search.loading = true;
            }
            tokio::join!(run_search(client, app), load_lot(client, app, &lot_id));
        }
        Err(e) => {
            tracing::warn!(error = %e, "seed failed");
            app.lock().await.apply_seed_failed(&e.message);
        }
    }
}

/// Seed a batch of demo lots, then refresh the listing.
async fn seed_many(client: &ApiClient, app: &Mutex<App>) {
    match client.seed_many().await {
        Ok(()) => {
            {
                let mut app = app.lock().await;
                app.apply_seed_done();
                app.search.loading = true;
            }
            run_search(client, app).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "seed_many failed");
            app.lock().await.apply_seed_failed(&e.message);
        }
    }
}
