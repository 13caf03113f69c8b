use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::NewsSession;
use crate::error::Result;
use crate::models::{Category, Region, SummaryModel};

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseAction {
    Quit,
    Help,
    List,
    Refresh,
    SelectCategory(Category),
    SelectRegion(Region),
    Summarize(usize, SummaryModel),
}

pub fn parse_action(line: &str) -> std::result::Result<BrowseAction, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(BrowseAction::List);
    };

    let action = match command {
        "q" | "quit" | "exit" => BrowseAction::Quit,
        "h" | "help" | "?" => BrowseAction::Help,
        "l" | "list" => BrowseAction::List,
        "r" | "refresh" => BrowseAction::Refresh,
        "c" | "category" => {
            let raw = words.next().ok_or("usage: category <name>")?;
            BrowseAction::SelectCategory(Category::from_user_input(raw).map_err(|e| format!("{}", e))?)
        }
        "country" | "region" => {
            let code = words.next().ok_or("usage: country <code>")?;
            BrowseAction::SelectRegion(Region::new(code.to_ascii_lowercase()))
        }
        "s" | "summarize" => {
            let index = words
                .next()
                .ok_or("usage: summarize <number> [bart|t5]")?
                .parse::<usize>()
                .map_err(|_| "headline number must be a non-negative integer".to_string())?;
            let model = match words.next() {
                Some(raw) => raw.parse().map_err(|e| format!("{}", e))?,
                None => SummaryModel::default(),
            };
            BrowseAction::Summarize(index, model)
        }
        other => return Err(format!("unknown command: {} (try help)", other)),
    };

    Ok(action)
}

const HELP: &str = "\
commands:
  list                      show the current headlines
  refresh                   fetch again
  category <name>           switch category (remembered as your preference)
  country <code>            switch country, e.g. us, gb, in
  summarize <n> [bart|t5]   summarize headline n
  quit";

/// Line-oriented browsing loop over stdin.
pub async fn run(session: &mut NewsSession<'_>) -> Result<()> {
    print_headlines(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match handle_action(session, action).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            // Fetch and summary failures are shown and browsing continues.
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

/// Returns true when the user asked to quit.
async fn handle_action(session: &mut NewsSession<'_>, action: BrowseAction) -> Result<bool> {
    match action {
        BrowseAction::Quit => return Ok(true),
        BrowseAction::Help => println!("{}", HELP),
        BrowseAction::List => print_headlines(session),
        BrowseAction::Refresh => {
            session.refresh().await?;
            print_headlines(session);
        }
        BrowseAction::SelectCategory(category) => {
            session.select_category(category).await?;
            print_headlines(session);
        }
        BrowseAction::SelectRegion(region) => {
            session.select_region(region).await?;
            print_headlines(session);
        }
        BrowseAction::Summarize(index, model) => {
            let outcome = session.summarize(index, model).await?;
            println!("{}\n", outcome.headline.title);
            print_wrapped(&outcome.summary.display_text());
            if !outcome.recorded {
                eprintln!("(could not remember this category for next time)");
            }
        }
    }

    Ok(false)
}

pub fn print_headlines(session: &NewsSession<'_>) {
    println!("{} headlines ({})", session.category, session.region);

    if session.headlines.is_empty() {
        println!("No headlines available for this category.");
        return;
    }

    for (index, headline) in session.headlines.iter().enumerate() {
        let published = headline
            .published_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("[{:>2}] {} {}", index, published, headline.title);
        if let Some(url) = &headline.url {
            println!("     {}", url);
        }
    }
}

pub fn print_wrapped(text: &str) {
    for line in textwrap::wrap(text, 80) {
        println!("{}", line);
    }
}
