use anyhow::Context as AnyhowContext;
use sk_types::chat::format_message;
use sk_types::{FilterForm, RecommendationForm};
use skinalyze::catalog::{self, GridState};
use skinalyze::chat::{self, Bubble};
use skinalyze::recommend::{self, ResultState};
use skinalyze::{Config, HttpApi, Page, PageKind};
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Reload,
    Description(usize),
    Recommend(RecommendationForm),
    Reset,
    Quit,
    Chat(String),
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Self::Chat(line.to_string());
        };
        let mut words = rest.split_whitespace();
        match words.next() {
            Some("cari") => Self::Search(words.collect::<Vec<_>>().join(" ")),
            Some("produk") => Self::Reload,
            Some("deskripsi") => match words.next().map(str::parse) {
                Some(Ok(n)) => Self::Description(n),
                _ => Self::Invalid("usage: :deskripsi <nomor>".to_string()),
            },
            Some("rekomendasi") => {
                let args: Vec<&str> = words.collect();
                if args.len() < 3 {
                    return Self::Invalid(
                        "usage: :rekomendasi <kategori> <jenis_kulit> <masalah_kulit> [af] [ff] [nc]"
                            .to_string(),
                    );
                }
                let flag = |f: &str| args[3..].contains(&f).then(|| "on".to_string());
                Self::Recommend(RecommendationForm {
                    category: Some(args[0].to_string()),
                    jenis_kulit: Some(args[1].to_string()),
                    masalah_kulit: Some(args[2].to_string()),
                    pref_alcohol_free: flag("af"),
                    pref_fragrance_free: flag("ff"),
                    pref_non_comedogenic: flag("nc"),
                })
            }
            Some("reset") => Self::Reset,
            Some("keluar") => Self::Quit,
            other => Self::Invalid(format!("Unknown command {}", other.unwrap_or_default())),
        }
    }
}

fn print_grid(grid: &GridState) {
    if let Some(message) = grid.message() {
        println!("{message}");
        return;
    }
    for (i, card) in grid.cards().iter().enumerate() {
        println!("[{i}] {} | {} | {}", card.name, card.brand, card.category);
        println!("    {}", card.ingredients);
        if !card.badges.is_empty() {
            let badges: Vec<String> = card.badges.iter().map(ToString::to_string).collect();
            println!("    {}", badges.join(", "));
        }
    }
}

fn print_results(results: &ResultState) {
    if let Some(message) = results.message() {
        println!("{message}");
        return;
    }
    for card in results.cards() {
        println!("* {} | {} | {}", card.name, card.brand, card.category);
        println!("    {}", card.ingredients);
        for note in &card.notes {
            println!("    ! {note}");
        }
    }
}

fn print_reply(transcript: &[Bubble]) {
    if let Some(Bubble::Bot(text)) = transcript.last() {
        let text: String = format_message(text).iter().map(ToString::to_string).collect();
        println!("> {text}");
    }
}

#[actix_rt::main]
async fn main() -> Result<(), anyhow::Error> {
    if let Err(env::VarError::NotPresent) = env::var("RUST_LOG") {
        env::set_var("RUST_LOG", "INFO");
    }
    pretty_env_logger::formatted_timed_builder()
        .parse_default_env()
        .init();

    let config = Arc::new(Config::load(".env")?);
    let mut args = env::args().skip(1);
    let body_class = args.next().unwrap_or_else(|| "page-home".to_string());
    let page_url = args
        .next()
        .map(|u| Url::parse(&u))
        .transpose()
        .context("Invalid page URL")?;
    let form = |search_text: String| FilterForm {
        search_text,
        page_url: page_url.clone(),
        ..Default::default()
    };

    let api = Arc::new(HttpApi::new(config.api_url.clone())?);
    log::info!("Using backend at {}", config.api_url);
    let page = Page::mount(config, api, &body_class, form(String::new()));
    if page.kind != PageKind::Other {
        print_grid(&page.catalog_settled().await?);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Search(text) => {
                page.catalog.send(catalog::ApplyFilter(form(text))).await?;
                print_grid(&page.catalog_settled().await?);
            }
            Command::Reload => {
                page.catalog.send(catalog::ApplyFilter(form(String::new()))).await?;
                print_grid(&page.catalog_settled().await?);
            }
            Command::Description(n) => {
                page.catalog.send(catalog::ShowDescription(n)).await?;
                let modal = page.catalog.send(catalog::GetModal).await?;
                if modal.open {
                    println!("{}", modal.text);
                    page.catalog.send(catalog::CloseModal).await?;
                }
            }
            Command::Recommend(form) => {
                page.recommend.send(recommend::Submit(form)).await?;
                print_results(&page.recommend_settled().await?);
            }
            Command::Reset => page.chat.send(chat::Reset).await?,
            Command::Chat(text) if text.is_empty() => (),
            Command::Chat(text) => {
                page.chat.send(chat::SendMessage(text)).await?;
                print_reply(&page.chat_settled().await?);
            }
            Command::Invalid(msg) => log::warn!("{msg}"),
        }
    }
    Ok(())
}
