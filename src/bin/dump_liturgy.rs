//! Print the liturgy of a day with verse numbers marked up.
//!
//! Usage: cargo run --bin dump_liturgy [-- --date 2024-12-25 --days 3 --json]

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use futures::future::join_all;

use liturgia::config::Config;
use liturgia::liturgy::{LiturgyClient, LiturgyDocument, LiturgySource, PassageKind};
use liturgia::logging;
use liturgia::services::{dates, formatter};

fn arg_value(name: &str) -> Option<String> {
    std::env::args()
        .position(|a| a == name)
        .and_then(|i| std::env::args().nth(i + 1))
}

fn print_document(date: NaiveDate, doc: &LiturgyDocument, raw_psalm: bool) {
    println!("=== {} ===", dates::format_long_date(date));
    println!("{} ({})", doc.name, doc.color);

    for (kind, passage) in doc.passages() {
        println!("\n--- {} | {} ---", kind.label(), passage.reference);
        if !passage.title.is_empty() {
            println!("{}", passage.title);
        }
        if let Some(refrain) = passage.refrain.as_deref().filter(|r| !r.is_empty()) {
            println!("R. {refrain}");
        }
        let body = if kind == PassageKind::Psalm && raw_psalm {
            passage.text.clone()
        } else {
            formatter::format_text(&passage.text)
        };
        println!("{body}");
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_stderr_tracing()?;

    let config = Config::load()?;
    let start = match arg_value("--date") {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("--date expects YYYY-MM-DD, got {s:?}"))?,
        None => config.initial_date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let days: i64 = match arg_value("--days") {
        Some(s) => s.parse().with_context(|| format!("--days expects a number, got {s:?}"))?,
        None => 1,
    };
    let json = std::env::args().any(|a| a == "--json");

    let client = LiturgyClient::new(&config);
    let range: Vec<NaiveDate> = (0..days.max(1)).map(|i| dates::shift_days(start, i)).collect();

    let results = join_all(range.iter().map(|date| client.fetch_liturgy(*date))).await;

    let mut failures = 0;
    for (date, result) in range.iter().zip(results) {
        match result {
            Ok(doc) if json => println!("{}", serde_json::to_string_pretty(&doc)?),
            Ok(doc) => print_document(*date, &doc, config.raw_psalm),
            Err(e) => {
                failures += 1;
                tracing::error!(%date, "failed to fetch liturgy: {e}");
            }
        }
    }

    if failures == range.len() {
        anyhow::bail!("no liturgy could be fetched");
    }
    Ok(())
}
