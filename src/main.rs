use std::io::Read;

use anyhow::{Context, Result};
use tracing::error;

use reflections::config::{self, Config};
use reflections::journal::{EntryDraft, Journal, WeatherSource};
use reflections::store::{schema, Store};
use reflections::InsightProvider;

const DEFAULT_RECENT: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reflections=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let result = if has_flag(&args, "--quote") {
        run_quote().await
    } else if has_flag(&args, "--write") {
        run_write(&args).await
    } else if has_flag(&args, "--recent") {
        run_recent(&args)
    } else {
        run_schema_tool()
    };

    if let Err(e) = result {
        error!("failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// No flags: make sure the database exists with the current schema.
fn run_schema_tool() -> Result<()> {
    let path = config::resolve_db_path();
    let status = schema::ensure_database(&path)
        .with_context(|| format!("failed to initialise database at {}", path.display()))?;
    println!("{}", status);
    Ok(())
}

async fn run_quote() -> Result<()> {
    let config = Config::from_env();
    let insight = InsightProvider::from_config(&config.insight);
    println!("{}", insight.generate_daily_quote().await);
    Ok(())
}

async fn run_write(args: &[String]) -> Result<()> {
    let mood: i64 = flag_value(args, "--mood")
        .context("--write needs --mood <1-5>")?
        .parse()
        .context("--mood must be a number")?;
    let factors = flag_value(args, "--factors").map(str::to_string);

    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;

    let config = Config::from_env();
    let store = Store::open(&config.db_path)?;
    let insight = InsightProvider::from_config(&config.insight);

    let mut journal = Journal::new(&store.db, &insight);
    if let Some(weather) = &config.weather {
        journal = journal.with_weather(WeatherSource::from_config(weather));
    }

    let submitted = journal
        .submit(EntryDraft {
            content: content.trim().to_string(),
            mood,
            mood_factors: factors,
        })
        .await?;

    println!("Saved entry #{}", submitted.entry.id);
    if let Some(weather) = submitted.entry.weather() {
        println!("{}°F, {}, {}% humidity", weather.temperature, weather.description, weather.humidity);
    }
    println!("\n{}", submitted.reflection);
    Ok(())
}

fn run_recent(args: &[String]) -> Result<()> {
    let limit = match flag_value(args, "--recent") {
        Some(n) => n.parse().context("--recent takes a number")?,
        None => DEFAULT_RECENT,
    };

    let config = Config::from_env();
    let store = Store::open(&config.db_path)?;
    let entries = store.db.get_entries(limit)?;
    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }

    for entry in entries {
        let when = entry
            .created()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| entry.date.clone());
        println!(
            "#{} {} mood {} sentiment {:+.2}",
            entry.id,
            when,
            entry.mood.map_or_else(|| "?".to_string(), |m| m.to_string()),
            entry.sentiment.unwrap_or(0.0)
        );
        println!("  {}", entry.content);
        if let Some(factors) = &entry.mood_factors {
            println!("  factors: {}", factors);
        }
        if let Some(insight) = &entry.ai_insight {
            println!("  {}", insight);
        }
    }
    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// The argument after `flag`, unless it is another flag.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1)
        .map(String::as_str)
        .filter(|v| !v.starts_with("--"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_values() {
        let a = args(&["reflections", "--write", "--mood", "4", "--factors", "sleep"]);
        assert!(has_flag(&a, "--write"));
        assert_eq!(flag_value(&a, "--mood"), Some("4"));
        assert_eq!(flag_value(&a, "--factors"), Some("sleep"));
        assert_eq!(flag_value(&a, "--write"), None);
        assert_eq!(flag_value(&a, "--recent"), None);
    }
}
