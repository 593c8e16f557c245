use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use eventra_client::view::Action;
use eventra_client::{Context, PageController, TerminalUi};
use eventra_core::{routes, BookingOutcome, SimulatedPayment, ToggleResult};
use eventra_shared::models::LoginRequest;
use eventra_shared::Id;
use eventra_store::{Config, FileTokenStore, HttpTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Answer yes to every confirmation.
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a page and print it.
    Open {
        #[arg(default_value = routes::PAGE_HOME)]
        path: String,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    /// Select seats on an event page and check out.
    Book {
        event_id: String,
        #[arg(required = true)]
        seat_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventra_client=debug,eventra_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Using backend at {}", config.api.base_url);

    let transport = Arc::new(HttpTransport::new(&config.api).context("Failed to build HTTP client")?);
    let store = Arc::new(
        FileTokenStore::open(&config.storage.token_path).context("Failed to open token store")?,
    );
    let ui = Arc::new(TerminalUi::new(args.yes));
    let payment = Arc::new(SimulatedPayment::new(config.booking.payment_delay()));
    let ctx = Arc::new(Context::new(transport, store, ui.clone(), payment));
    let page = PageController::new(ctx);

    match args.command.unwrap_or(Command::Open {
        path: routes::PAGE_HOME.to_string(),
    }) {
        Command::Open { path } => {
            let view = page.load(&path).await;
            print!("{}", view.outline());
        }
        Command::Login { username, password } => {
            page.load(routes::PAGE_LOGIN).await;
            page.submit_login(LoginRequest { username, password }).await;
        }
        Command::Logout => {
            page.dispatch(Action::Logout).await;
        }
        Command::Book { event_id, seat_ids } => {
            page.load(&routes::event_page(&event_id)).await;
            let board = page.board();
            for seat_id in seat_ids {
                let result = board.lock().toggle(&Id::from(seat_id.as_str()));
                if result != ToggleResult::Selected {
                    println!("Seat {} not selected ({:?})", seat_id, result);
                }
            }
            let summary = board.lock().summary();
            println!(
                "Selected {} seat(s) {} for ${}",
                summary.count,
                summary.labels,
                summary.total_display()
            );
            if let Some(BookingOutcome::Confirmed { booking_id, .. }) = page.checkout().await {
                println!("Booking {} confirmed", booking_id);
            }
        }
    }

    if let Some(location) = ui.take_location() {
        if location.starts_with("/api/") {
            println!("-> {}{}", config.api.base_url.trim_end_matches('/'), location);
        } else {
            println!("-> {}", location);
        }
    }
    Ok(())
}
