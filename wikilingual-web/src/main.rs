use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use wikilingual::article::ArticleIdentity;
use wikilingual::highlight::{HighlightError, HighlightRecord, HighlightService, JsonFileStore};
use wikilingual::mt::{GoogleWebTranslator, Translator, translate_text};
use wikilingual::sections::{Section, SectionSplitter};
use wikilingual::wiki::{ContentProvider, LanguageLink, WikipediaProvider};

#[derive(Clone)]
struct AppState {
    provider: Arc<WikipediaProvider>,
    translator: Arc<dyn Translator>,
    highlights: Arc<HighlightService>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?),
        )
        .init();

    let data_dir = std::env::var("WIKILINGUAL_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = Arc::new(JsonFileStore::new(
        Path::new(&data_dir).join("highlights.json"),
    ));
    let state = AppState {
        provider: Arc::new(WikipediaProvider::new()?),
        translator: Arc::new(GoogleWebTranslator::new()?),
        highlights: Arc::new(HighlightService::new(store)),
    };

    let app = Router::new()
        .route("/api/search", get(search))
        .route("/api/article", get(article))
        .route("/api/translate", post(translate))
        .route("/api/highlights", get(list_highlights).post(submit_highlight))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("📚 wikilingual web API listening at http://127.0.0.1:3000");
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
    #[serde(default = "default_lang")]
    lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let titles = state
        .provider
        .search(&params.q, &params.lang)
        .await
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.to_string()))?;
    Ok(Json(titles))
}

#[derive(Deserialize)]
struct ArticleParams {
    title: String,
    #[serde(default = "default_lang")]
    lang: String,
    /// Optional target language for machine translation of the displayed text.
    translate_to: Option<String>,
}

#[derive(Serialize)]
struct ArticleResponse {
    title: String,
    url: String,
    language: String,
    /// Lead extract with review highlights applied.
    summary: String,
    sections: Vec<Section>,
    available_languages: Vec<LanguageLink>,
}

async fn article(
    State(state): State<AppState>,
    Query(params): Query<ArticleParams>,
) -> Result<Json<ArticleResponse>, ApiError> {
    info!("Fetching article '{}' ({})", params.title, params.lang);

    let article = state
        .provider
        .fetch_article(&params.title, &params.lang)
        .await
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.to_string()))?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "article not found"))?;
    let identity = article.identity(&params.lang);

    let available_languages = state
        .provider
        .language_links(&params.title, &params.lang)
        .await
        .unwrap_or_default();

    let mut summary = article.summary.clone();
    if let Some(target) = params.translate_to.as_deref() {
        summary =
            translate_text(Arc::clone(&state.translator), &summary, &params.lang, target).await;
    }
    summary = state.highlights.get_highlighted(&identity, &summary);

    let splitter = SectionSplitter::detect(&article.content);
    let mut sections = Vec::new();
    for section in splitter.split(&article.content) {
        let mut content = section.content.clone();
        if let Some(target) = params.translate_to.as_deref() {
            content =
                translate_text(Arc::clone(&state.translator), &content, &params.lang, target)
                    .await;
        }
        sections.push(Section {
            title: section.title.clone(),
            content: state.highlights.get_highlighted(&identity, &content),
            level: section.level,
        });
    }

    Ok(Json(ArticleResponse {
        title: article.title,
        url: article.url,
        language: params.lang,
        summary,
        sections,
        available_languages,
    }))
}

#[derive(Deserialize)]
struct TranslateRequest {
    text: String,
    target: String,
    #[serde(default = "default_auto")]
    source: String,
}

fn default_auto() -> String {
    "auto".to_string()
}

#[derive(Serialize)]
struct TranslateResponse {
    translated: String,
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let translated = translate_text(
        Arc::clone(&state.translator),
        &request.text,
        &request.source,
        &request.target,
    )
    .await;
    Ok(Json(TranslateResponse { translated }))
}

#[derive(Deserialize)]
struct HighlightParams {
    title: String,
    #[serde(default = "default_lang")]
    lang: String,
}

async fn list_highlights(
    State(state): State<AppState>,
    Query(params): Query<HighlightParams>,
) -> Json<Vec<HighlightRecord>> {
    let identity = ArticleIdentity::new(&params.title, &params.lang);
    Json(state.highlights.highlights(&identity))
}

#[derive(Deserialize)]
struct SubmitRequest {
    title: String,
    #[serde(default = "default_lang")]
    lang: String,
    text: String,
    #[serde(default = "default_context")]
    context: String,
}

fn default_context() -> String {
    "article".to_string()
}

async fn submit_highlight(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<HighlightRecord>, ApiError> {
    // Validate against the article as currently served, so a highlight can
    // only be recorded for text that is really there.
    let article = state
        .provider
        .fetch_article(&request.title, &request.lang)
        .await
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.to_string()))?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "article not found"))?;
    let identity = article.identity(&request.lang);

    match state
        .highlights
        .submit(&identity, &request.text, &article.content, &request.context)
    {
        Ok(record) => {
            info!("Recorded review highlight for {}", identity);
            Ok(Json(record))
        }
        Err(e @ (HighlightError::EmptyText | HighlightError::NotInSource)) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}
