use anyhow::Context;
use clap::{Parser, Subcommand};

mod ai;
mod app;
mod browse;
mod config;
mod db;
mod error;
mod models;
mod news;
mod preferences;
mod services;

use app::App;
use browse::{print_headlines, print_wrapped};
use config::Config;
use models::{Category, Region, SummaryModel, UserIdentity};

#[derive(Parser)]
#[command(name = "newsdesk", version, about = "Top headlines for the category you care about")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the local profile for a user (starts on "general")
    Signup {
        email: String,
        #[arg(long)]
        name: String,
    },
    /// List headlines for the user's category
    Headlines {
        email: String,
        /// Skip preference lookup and show this category
        #[arg(long, value_parser = Category::from_user_input)]
        category: Option<Category>,
        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,
    },
    /// Browse interactively: switch category or country and summarize from a prompt
    Browse {
        email: String,
        #[arg(long, value_parser = Category::from_user_input)]
        category: Option<Category>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Change the user's preferred category
    SetCategory {
        email: String,
        #[arg(value_parser = Category::from_user_input)]
        category: Category,
    },
    /// Summarize one headline by its position in the list
    Summarize {
        email: String,
        index: usize,
        #[arg(long, default_value = "bart")]
        model: SummaryModel,
        #[arg(long, value_parser = Category::from_user_input)]
        category: Option<Category>,
        #[arg(long)]
        country: Option<String>,
    },
    /// List the available categories
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Categories => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
        Command::Signup { email, name } => {
            let user = UserIdentity::new(email)?;
            load_app().await?.signup(&user, &name).await?;
            println!("Welcome, {}! Your category is {}.", name, Category::default());
        }
        Command::Headlines {
            email,
            category,
            country,
        } => {
            let app = load_app().await?;
            let session = app
                .open(UserIdentity::new(email)?, category, country.map(Region::new))
                .await?;
            print_headlines(&session);
        }
        Command::Browse {
            email,
            category,
            country,
        } => {
            let app = load_app().await?;
            let mut session = app
                .open(UserIdentity::new(email)?, category, country.map(Region::new))
                .await?;
            browse::run(&mut session).await?;
        }
        Command::SetCategory { email, category } => {
            load_app()
                .await?
                .set_preferred_category(&UserIdentity::new(email)?, category)
                .await?;
            println!("Preferred category set to {}.", category);
        }
        Command::Summarize {
            email,
            index,
            model,
            category,
            country,
        } => {
            let app = load_app().await?;
            let session = app
                .open(UserIdentity::new(email)?, category, country.map(Region::new))
                .await?;
            let outcome = session.summarize(index, model).await?;

            println!("{}\n", outcome.headline.title);
            print_wrapped(&outcome.summary.display_text());
            if !outcome.recorded {
                eprintln!("(could not remember this category for next time)");
            }
        }
    }

    Ok(())
}

async fn load_app() -> anyhow::Result<App> {
    let config = Config::load().context("loading configuration")?;
    let app = App::new(&config).await.context("starting newsdesk")?;
    Ok(app)
}
