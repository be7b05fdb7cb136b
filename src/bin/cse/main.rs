mod analyze;
mod dashboard;
mod dividends;
mod download;
mod progress;
mod prompt;
mod roster;

use cse_rs::{CseClient, Settings};
use tracing_subscriber::EnvFilter;

/// Everything a menu needs.
pub(crate) struct Ctx {
    pub client: CseClient,
    pub settings: Settings,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    init_tracing();

    let ctx = Ctx {
        client: settings.client()?,
        settings,
    };

    println!("CSE toolkit");
    println!("===========");

    loop {
        let choice = prompt::choose(
            "What do you want to do?",
            &[
                "Market dashboard",
                "Investment analysis",
                "Download financial reports",
                "Dividends",
                "Refresh company roster (A-Z)",
                "Quit",
            ],
        )?;

        let result = match choice {
            0 => dashboard::run(&ctx).await,
            1 => analyze::run(&ctx).await,
            2 => download::run(&ctx).await,
            3 => dividends::run(&ctx).await,
            4 => roster::run(&ctx).await,
            _ => break,
        };
        if let Err(e) = result {
            eprintln!("error: {e:#}");
        }
        println!();
    }

    Ok(())
}
