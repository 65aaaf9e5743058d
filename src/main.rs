use std::path::Path;
use std::sync::Arc;

use clap::{Arg, ArgAction, Command};

use wikilingual::article::ArticleIdentity;
use wikilingual::highlight::{HighlightService, JsonFileStore};
use wikilingual::languages;
use wikilingual::mt::{GoogleWebTranslator, Translator, translate_text};
use wikilingual::sections::SectionSplitter;
use wikilingual::wiki::{ContentProvider, WikipediaProvider};

fn lang_arg() -> Arg {
    Arg::new("lang")
        .long("lang")
        .short('l')
        .help("Language edition code (e.g. en, es, fr)")
        .default_value("en")
}

fn title_arg() -> Arg {
    Arg::new("title")
        .help("Exact article title")
        .required(true)
        .index(1)
}

fn str_arg<'a>(matches: &'a clap::ArgMatches, name: &str, default: &'a str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("wikilingual")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Multilingual encyclopedia browser with shared review highlights")
        .subcommand_required(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .default_value("data")
                .help("Directory holding the persisted review highlights"),
        )
        .subcommand(
            Command::new("search")
                .about("Search for article titles")
                .arg(
                    Arg::new("query")
                        .help("Search term")
                        .required(true)
                        .index(1),
                )
                .arg(lang_arg()),
        )
        .subcommand(
            Command::new("article")
                .about("Fetch an article and show it section by section")
                .arg(title_arg())
                .arg(lang_arg())
                .arg(
                    Arg::new("translate-to")
                        .long("translate-to")
                        .short('t')
                        .help("Machine-translate the displayed text to this language"),
                )
                .arg(
                    Arg::new("plain")
                        .long("plain")
                        .help("Skip review-highlight markup")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("languages")
                .about("List the language editions an article is available in")
                .arg(title_arg())
                .arg(lang_arg()),
        )
        .subcommand(
            Command::new("review")
                .about("Mark a passage of an article for review (visible to all readers)")
                .arg(title_arg())
                .arg(lang_arg())
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Exact text from the article to flag")
                        .required(true),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .help("Label of the span the text was taken from")
                        .default_value("article"),
                ),
        )
        .subcommand(
            Command::new("reviews")
                .about("List the review highlights stored for an article")
                .arg(title_arg())
                .arg(lang_arg()),
        )
        .get_matches();

    let data_dir = str_arg(&matches, "data-dir", "data");
    let store = Arc::new(JsonFileStore::new(
        Path::new(data_dir).join("highlights.json"),
    ));
    let highlights = HighlightService::new(store);
    let provider = WikipediaProvider::new()?;

    match matches.subcommand() {
        Some(("search", sub)) => {
            let query = str_arg(sub, "query", "");
            let lang = str_arg(sub, "lang", "en");
            let titles = provider.search(query, lang).await?;
            if titles.is_empty() {
                println!("No results for \"{}\" ({})", query, lang);
            } else {
                for (i, title) in titles.iter().enumerate() {
                    println!("{:2}. {}", i + 1, title);
                }
            }
        }
        Some(("article", sub)) => {
            let title = str_arg(sub, "title", "");
            let lang = str_arg(sub, "lang", "en");
            let plain = sub.get_flag("plain");
            let translate_to = sub.get_one::<String>("translate-to").map(String::as_str);

            let Some(article) = provider.fetch_article(title, lang).await? else {
                eprintln!("❌ No article titled \"{}\" in {}", title, lang);
                std::process::exit(1);
            };
            let identity = article.identity(lang);

            let translator: Option<Arc<dyn Translator>> = match translate_to {
                Some(_) => Some(Arc::new(GoogleWebTranslator::new()?)),
                None => None,
            };

            println!("📖 {}", article.title);
            println!("🔗 {}", article.url);

            let mut summary = article.summary.clone();
            if let (Some(target), Some(translator)) = (translate_to, translator.as_ref()) {
                summary = translate_text(Arc::clone(translator), &summary, lang, target).await;
            }
            if !plain {
                summary = highlights.get_highlighted(&identity, &summary);
            }
            println!("\n{}\n", summary);

            let splitter = SectionSplitter::detect(&article.content);
            for section in splitter.split(&article.content) {
                let mut content = section.content.clone();
                if let (Some(target), Some(translator)) = (translate_to, translator.as_ref()) {
                    content = translate_text(Arc::clone(translator), &content, lang, target).await;
                }
                if !plain {
                    content = highlights.get_highlighted(&identity, &content);
                }
                println!("== {} ==", section.display_title());
                println!("{}\n", content);
            }

            if let Some(target) = translate_to {
                println!(
                    "🌍 Translated {} → {}",
                    languages::language_name(lang),
                    languages::language_name(target)
                );
            }
        }
        Some(("languages", sub)) => {
            let title = str_arg(sub, "title", "");
            let lang = str_arg(sub, "lang", "en");
            for link in provider.language_links(title, lang).await? {
                println!(
                    "{:8} {} ({})",
                    link.code,
                    languages::native_language_name(&link.code),
                    link.title
                );
            }
        }
        Some(("review", sub)) => {
            let title = str_arg(sub, "title", "");
            let lang = str_arg(sub, "lang", "en");
            let text = str_arg(sub, "text", "");
            let context = str_arg(sub, "context", "article");

            let Some(article) = provider.fetch_article(title, lang).await? else {
                eprintln!("❌ No article titled \"{}\" in {}", title, lang);
                std::process::exit(1);
            };
            let identity = article.identity(lang);
            match highlights.submit(&identity, text, &article.content, context) {
                Ok(record) => {
                    println!("✅ Marked for review: \"{}\"", record.text);
                    println!("   Visible to every reader of this article.");
                }
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(("reviews", sub)) => {
            let title = str_arg(sub, "title", "");
            let lang = str_arg(sub, "lang", "en");
            let identity = ArticleIdentity::new(title, lang);
            let records = highlights.highlights(&identity);
            if records.is_empty() {
                println!("No review highlights for \"{}\" ({})", title, lang);
            } else {
                for record in records {
                    println!("• \"{}\" [{}]", record.text, record.context);
                }
            }
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
