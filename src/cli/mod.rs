use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::application::TrackerService;
use crate::domain::{KNOWN_CATEGORIES, TransactionKind, format_cents, parse_cents};
use crate::theme::ThemeRegistry;

/// Moneta - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "moneta")]
#[command(about = "A local-first personal finance tracker with a themeable UI core")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "moneta.db")]
    pub database: String,

    /// Theme definition file
    #[arg(long, default_value = "config/themes.toml")]
    pub themes: String,

    /// User settings file
    #[arg(long, default_value = "config/settings.toml")]
    pub settings: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a transaction
    Add {
        /// Transaction kind: "income" or "expense"
        kind: String,

        /// Category (e.g. "Food", "Salary")
        category: String,

        /// Amount (e.g. "50.00" or "50")
        amount: String,

        /// Description of the transaction
        #[arg(short = 'm', long)]
        description: Option<String>,

        /// Business date (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent transactions
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// Show the running balance
    Balance,

    /// Show rolling 30-day statistics
    Stats,

    /// Delete a transaction by id
    Delete {
        /// Transaction id
        id: i64,
    },

    /// Theme management commands
    #[command(subcommand)]
    Theme(ThemeCommands),
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// List available themes
    List,

    /// Show the active theme
    Current,

    /// Switch to a theme and persist the selection
    Set {
        /// Theme key (lowercase letters, digits, underscore)
        key: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli {
            database,
            themes,
            settings,
            command,
            ..
        } = self;

        match command {
            Commands::Init => {
                TrackerService::init(&database).await?;
                println!("Initialized database at {}", database);
                Ok(())
            }

            Commands::Add {
                kind,
                category,
                amount,
                description,
                date,
            } => {
                let service = TrackerService::init(&database).await?;

                let kind = match TransactionKind::from_str(&kind) {
                    Some(kind) => kind,
                    None => bail!("Unknown kind '{}': expected 'income' or 'expense'", kind),
                };
                let amount_cents =
                    parse_cents(&amount).with_context(|| format!("Invalid amount '{}'", amount))?;

                match date {
                    Some(date_str) => {
                        let occurred_at = parse_date(&date_str)?;
                        service
                            .add_transaction_at(
                                kind,
                                &category,
                                amount_cents,
                                description.as_deref(),
                                occurred_at,
                            )
                            .await?;
                    }
                    None => {
                        service
                            .add_transaction(kind, &category, amount_cents, description.as_deref())
                            .await?;
                    }
                }

                println!(
                    "Recorded {} {} {}",
                    kind,
                    category,
                    format_cents(amount_cents)
                );
                Ok(())
            }

            Commands::List { limit } => {
                let service = TrackerService::init(&database).await?;
                let transactions = service.recent(limit).await?;

                if transactions.is_empty() {
                    println!("No transactions recorded.");
                    return Ok(());
                }

                println!(
                    "{:<6} {:<12} {:<10} {:<15} {:>12}  {}",
                    "ID", "DATE", "KIND", "CATEGORY", "AMOUNT", "DESCRIPTION"
                );
                for tx in transactions {
                    println!(
                        "{:<6} {:<12} {:<10} {:<15} {:>12}  {}",
                        tx.id,
                        tx.occurred_at.format("%Y-%m-%d"),
                        tx.kind,
                        tx.category,
                        format_cents(tx.amount_cents),
                        tx.description.as_deref().unwrap_or("-"),
                    );
                }
                Ok(())
            }

            Commands::Balance => {
                let service = TrackerService::init(&database).await?;
                println!("Balance: {}", format_cents(service.balance().await?));
                Ok(())
            }

            Commands::Stats => {
                let service = TrackerService::init(&database).await?;
                let stats = service.statistics().await?;

                println!("Last 30 days");
                println!("  Income:  {}", format_cents(stats.monthly_income));
                println!("  Expense: {}", format_cents(stats.monthly_expense));
                println!(
                    "  Net:     {}",
                    format_cents(stats.monthly_income - stats.monthly_expense)
                );

                if !stats.top_categories.is_empty() {
                    println!("Top expense categories:");
                    for entry in &stats.top_categories {
                        println!("  {:<15} {}", entry.category, format_cents(entry.total));
                    }
                }
                Ok(())
            }

            Commands::Delete { id } => {
                let service = TrackerService::init(&database).await?;
                if service.delete_transaction(id).await {
                    println!("Deleted transaction {}", id);
                    Ok(())
                } else {
                    bail!("Failed to delete transaction {}", id)
                }
            }

            Commands::Theme(command) => run_theme(&themes, &settings, command),
        }
    }
}

fn run_theme(themes: &str, settings: &str, command: ThemeCommands) -> Result<()> {
    let mut registry =
        ThemeRegistry::load(themes, settings).context("Failed to load theme registry")?;

    match command {
        ThemeCommands::List => {
            let active = registry.current_theme_key().to_string();
            for info in registry.available_themes() {
                let marker = if info.key == active { "*" } else { " " };
                println!(
                    "{} {:<16} {:<20} {}",
                    marker, info.key, info.name, info.description
                );
            }
            Ok(())
        }

        ThemeCommands::Current => {
            let theme = registry.current_theme();
            println!("{} - {}", theme.key, theme.name);
            println!("{}", theme.description);
            for (role, color) in &theme.colors {
                println!("  {:<20} {}", role, color);
            }
            if !theme.categories.is_empty() {
                println!("  categories:");
                for category in KNOWN_CATEGORIES {
                    if let Some(color) = theme.categories.get(*category) {
                        println!("    {:<18} {}", category, color);
                    }
                }
            }
            Ok(())
        }

        ThemeCommands::Set { key } => {
            if registry.switch_theme(&key) {
                println!("Switched to theme '{}'", key);
                Ok(())
            } else {
                bail!("Could not switch to theme '{}'", key)
            }
        }
    }
}

fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}': expected YYYY-MM-DD", date_str))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .context("Invalid date")
}
