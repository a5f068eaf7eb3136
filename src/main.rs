mod app;
mod forms;
mod gateway;
mod models;
mod notify;
mod ui;
mod validate;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use app::{App, SubmitPayload, SubmitResult};
use gateway::{DEFAULT_SUCCESS_RATE, Gateway, HttpGateway, MockGateway};

#[derive(Parser)]
#[command(name = "stint")]
#[command(about = "Internship intake - submit applications and generate offer letters")]
struct Cli {
    /// Base URL of a real intake backend; without it submissions are simulated
    #[arg(long)]
    endpoint: Option<String>,

    /// Simulated gateway latency in milliseconds
    #[arg(long, default_value = "1500")]
    latency_ms: u64,

    /// Simulated gateway acceptance probability (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_SUCCESS_RATE)]
    success_rate: f64,
}

/// How long the event loop waits for input before running timer checks.
const TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let gateway: Arc<dyn Gateway> = match &cli.endpoint {
        Some(endpoint) => Arc::new(HttpGateway::new(endpoint.clone())),
        None => Arc::new(MockGateway::new(
            Duration::from_millis(cli.latency_ms),
            cli.success_rate,
        )),
    };

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, gateway).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    gateway: Arc<dyn Gateway>,
) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        // Completed gateway calls land here on the next pass.
        while let Ok(result) = rx.try_recv() {
            app.on_outcome(result, Instant::now());
        }
        app.on_tick(Instant::now());
        if app.should_quit {
            break;
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(payload) = app.on_key(key, Instant::now()) {
                    dispatch(payload, gateway.clone(), tx.clone());
                }
            }
        }
    }
    Ok(())
}

/// Run one submission in the background; the result is delivered back to the
/// loop over the channel.
fn dispatch(
    payload: SubmitPayload,
    gateway: Arc<dyn Gateway>,
    tx: mpsc::UnboundedSender<SubmitResult>,
) {
    tokio::spawn(async move {
        let result = match payload {
            SubmitPayload::Application(application) => {
                SubmitResult::Application(gateway.submit_application(application).await)
            }
            SubmitPayload::Offer(offer) => SubmitResult::Offer(gateway.submit_offer(offer).await),
        };
        let _ = tx.send(result);
    });
}
