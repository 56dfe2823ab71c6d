use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;

use crate::api::{ApiScoreRequest, ApiScoreResponse, ScorePlan};
use utility_filter::config::ScoringConfig;
use utility_filter::explain::explain;
use utility_filter::scoring::UtilityScorer;
use utility_filter::votes::VoteClient;

#[derive(Clone)]
struct AppState {
    scorer: Arc<UtilityScorer>,
    votes: VoteClient,
}

pub async fn serve(args: crate::ServeArgs, config: ScoringConfig) -> Result<(), String> {
    let votes = VoteClient::from_config(&config.votes)
        .map_err(|err| format!("failed to build vote client: {}", err))?;
    let _sweeper = votes
        .cache()
        .spawn_sweeper(Duration::from_secs(config.votes.cache_ttl_secs));
    let state = AppState {
        scorer: Arc::new(UtilityScorer::new(&config)),
        votes,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/score", post(score_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    tracing::info!(%addr, "utility scorer listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn score_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiScoreRequest>,
) -> Result<Json<ApiScoreResponse>, (StatusCode, String)> {
    let video_id = request.video_id.clone();
    let plan = request
        .into_plan()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let raw = match plan {
        ScorePlan::Ready(raw) => raw,
        ScorePlan::FetchVotes {
            video_id,
            subscribers,
            days_old,
            title,
        } => {
            let votes = state.votes.fetch(&video_id).await.map_err(|err| {
                tracing::warn!(%video_id, error = %err, "vote lookup failed");
                (StatusCode::BAD_GATEWAY, format!("score unavailable: {}", err))
            })?;
            votes.into_signals(subscribers, days_old, title)
        }
    };

    let result = state.scorer.score_raw(&raw);
    tracing::debug!(
        video_id = video_id.as_deref().unwrap_or("-"),
        score = result.score,
        tier = result.tier.as_str(),
        "scored video"
    );
    let breakdown = explain(&result, state.scorer.weights());
    Ok(Json(ApiScoreResponse::from_result(result, breakdown, video_id)))
}
