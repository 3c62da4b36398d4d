use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{oneshot, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookfinder::config::Config;
use bookfinder::openlibrary::OpenLibraryClient;
use bookfinder::services::{SearchController, SearchSettings, SearchState};
use bookfinder::ui;

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Html,
}

/// One full screen of output for the given state
fn render_frame(state: &SearchState, settings: &SearchSettings, format: OutputFormat) -> String {
    let view = ui::render(state, settings);
    match format {
        OutputFormat::Html => ui::render_html(&state.input, &view),
        OutputFormat::Text => format!("> {}\n{}", state.input, ui::render_text(&view)),
    }
}

/// Frames are best-effort: a closed stdout must not stop the widget
fn write_frame(out: &mut impl Write, frame: &str) {
    let _ = writeln!(out, "{}", frame);
    let _ = out.flush();
}

/// Print a frame every time the state changes, skipping identical frames.
/// On shutdown the latest state is printed one last time if it is new.
async fn run_renderer(
    mut updates: watch::Receiver<SearchState>,
    settings: SearchSettings,
    format: OutputFormat,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut last_frame = String::new();
    loop {
        let frame = {
            let state = updates.borrow_and_update();
            render_frame(&state, &settings, format)
        };
        if frame != last_frame {
            write_frame(&mut std::io::stdout().lock(), &frame);
            last_frame = frame;
        }

        let shutting_down = tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                false
            }
            _ = &mut shutdown => true,
        };

        if shutting_down {
            let frame = render_frame(&updates.borrow(), &settings, format);
            if frame != last_frame {
                write_frame(&mut std::io::stdout().lock(), &frame);
            }
            break;
        }
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only carries the rendered widget
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookfinder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let format = if args.iter().any(|arg| arg == "--html") {
        OutputFormat::Html
    } else {
        OutputFormat::Text
    };

    let config = Config::from_env();

    let client = match OpenLibraryClient::new(&config.catalog_base_url, config.catalog_timeout())
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Book Finder searching {}", client.base_url());

    let controller = SearchController::spawn(Arc::new(client), config.search_settings());

    let (stop_tx, stop_rx) = oneshot::channel();
    let renderer = tokio::spawn(run_renderer(
        controller.subscribe(),
        controller.settings().clone(),
        format,
        stop_rx,
    ));

    // Every line is the full new contents of the search field
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => controller.input(line),
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    controller.settled().await;
    let _ = stop_tx.send(());
    if let Err(e) = renderer.await {
        tracing::error!("Renderer stopped unexpectedly: {}", e);
    }
}
