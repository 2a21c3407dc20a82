use anyhow::Result;
use matchfeed::{run_sync, Config};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    println!("{}", "=".repeat(60));
    println!("matchfeed - odds sync");
    println!("{}", "=".repeat(60));

    if !config.watch {
        let report = run_sync(&config).await?;
        print_report(&report);
        println!("SYNC OK");
        return Ok(());
    }

    // Watch mode: a failed iteration is logged, not fatal; the previous
    // output files stay in place until a run succeeds.
    let interval = Duration::from_secs(config.update_interval_hours * 3600);
    loop {
        match run_sync(&config).await {
            Ok(report) => {
                print_report(&report);
                println!("SYNC OK, next run in {}h", config.update_interval_hours);
            }
            Err(e) => {
                eprintln!("SYNC FAILED: {:#}", e);
            }
        }
        tokio::time::sleep(interval).await;
    }
}

fn print_report(report: &matchfeed::SyncReport) {
    println!();
    for (name, count) in &report.sources {
        println!("  {}: {} records", name, count);
    }
    println!();
    print!("{}", report.stats);
}
