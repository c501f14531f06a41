use std::io::Write;

use anyhow::Result;
use skycast_core::Config;
use skycast_ui::commands::{self, Command, HELP};
use skycast_ui::{AppController, AppServices, HistoryRow, TerminalView, View};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _) = Config::load_validated()?;
    let services = AppServices::from_config(&config)?;

    let mut app = AppController::new(
        services.weather,
        services.history,
        TerminalView::new(std::io::stdout()),
    );

    tracing::info!("SkyCast started");
    println!("SkyCast - Weather Dashboard");
    println!("Type a city name to search, or 'help' for commands.\n");

    app.initialize().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("! {}", message);
                continue;
            }
        };

        if !run(&mut app, command).await {
            break;
        }
    }

    tracing::info!("SkyCast shutting down");
    Ok(())
}

/// Run one command. Returns false once the user asks to quit.
async fn run<V: View>(app: &mut AppController<V>, command: Command) -> bool {
    match command {
        Command::Search(input) => {
            // failures are already shown
            let _ = app.submit_search(&input).await;
        }
        Command::Open(n) => {
            if let Some(row) = row_at(app, n) {
                app.dispatch(&row.click_entry()).await;
            }
        }
        Command::Delete(n) => {
            if let Some(row) = row_at(app, n) {
                app.dispatch(&row.click_delete()).await;
            }
        }
        Command::History => app.refresh_history().await,
        Command::Help => print!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

/// The n-th displayed history row (1-based).
fn row_at<V: View>(app: &AppController<V>, n: usize) -> Option<HistoryRow> {
    let row = n.checked_sub(1).and_then(|i| app.history_rows().get(i).cloned());
    if row.is_none() {
        println!("! No history entry {}", n);
    }
    row
}
