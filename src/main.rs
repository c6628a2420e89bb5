use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Utc;
use hyperchat_payout::{
    AppError, Config, DonationSource, SupabaseClient, export, page,
    report::{self, WeeklyReport},
    week,
};

#[derive(Clone)]
struct AppState {
    source: Arc<dyn DonationSource>,
    tables: Arc<[String]>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let app_state = AppState {
        source: Arc::new(SupabaseClient::new(&config.supabase_url, &config.supabase_key)),
        tables: config.donation_tables.into(),
    };

    let app = Router::new()
        .route("/", get(report_page))
        .route("/report.csv", get(report_csv))
        .route("/api/report", get(report_json))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    tracing::info!("Listening on 0.0.0.0:3000");

    axum::serve(listener, app).await.unwrap();
}

/// Nothing is cached; every request settles the previous completed week
/// from live table reads.
async fn current_report(app_state: &AppState) -> WeeklyReport {
    let now = Utc::now().with_timezone(&week::report_timezone());
    let window = week::settlement_week(now);

    report::build_weekly_report(app_state.source.as_ref(), &app_state.tables, window).await
}

async fn report_page(State(app_state): State<AppState>) -> Html<String> {
    let report = current_report(&app_state).await;

    Html(page::render_report(&report))
}

async fn report_csv(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let report = current_report(&app_state).await;
    let body = export::render_csv(&report.summaries)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::file_name(&report.window)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn report_json(State(app_state): State<AppState>) -> Json<WeeklyReport> {
    Json(current_report(&app_state).await)
}
