use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse, Response},
};

use crate::{
    error::AppError,
    figure::{prepare_figure, render_chart},
    html,
    state::AppState,
    stats::calculate_statistics,
};

/// Cap on rows shown by the data page.
const DATA_PAGE_ROWS: usize = 100;

pub async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;
    if dataset.is_empty() {
        return Ok(render_page("Home", &html::placeholder("No data available")));
    }

    let stats = calculate_statistics(&dataset);
    if stats.is_empty() {
        return Ok(render_page(
            "Home",
            &html::placeholder("No statistics available"),
        ));
    }

    Ok(render_page("Home", &html::stats_table(&stats)))
}

pub async fn data_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;
    if dataset.is_empty() {
        return Ok(render_page("Data", &html::placeholder("No data available")));
    }

    let shown = &dataset[..dataset.len().min(DATA_PAGE_ROWS)];
    Ok(render_page("Data", &html::records_table(shown)))
}

pub async fn image_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;
    if dataset.is_empty() {
        return Ok(render_page(
            "Chart",
            &html::placeholder("No data available to generate image"),
        ));
    }

    let stats = calculate_statistics(&dataset);
    if stats.is_empty() {
        return Ok(render_page(
            "Chart",
            &html::placeholder("No statistics available to generate image"),
        ));
    }

    let figure = prepare_figure(&render_chart(&stats)?);
    Ok(([(CONTENT_TYPE, "image/svg+xml")], figure).into_response())
}

pub async fn about_handler() -> Response {
    render_page("About", &html::about())
}

pub async fn json_dataset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset).into_response())
}

pub async fn json_stats_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;
    Ok(Json(calculate_statistics(&dataset)).into_response())
}

fn render_page(title: &str, content: &str) -> Response {
    Html(html::page(title, content)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode};

    use super::*;
    use crate::{
        cache::memory::MemoryCache,
        config::Config,
        dataset::parse_records,
    };

    fn state_with_rows(rows: &[&str]) -> Arc<AppState> {
        let mut body = String::from(
            "title,score,score_phrase,platform,genre,release_year,release_month,release_day",
        );
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }

        let (records, _) = parse_records(&body, false);
        let blobs = records
            .iter()
            .map(|r| serde_json::to_vec(r).unwrap())
            .collect();

        AppState::with_cache(
            Config::default(),
            Box::new(MemoryCache::preloaded(blobs, true)),
        )
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn json_stats_on_empty_dataset_is_empty_object() {
        let state = state_with_rows(&[]);

        let response = json_stats_handler(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "{}");
    }

    #[tokio::test]
    async fn json_stats_counts_per_year() {
        let state = state_with_rows(&[
            "A,9.0,Amazing,PS2,Action,2001,1,1",
            "B,8.0,Great,PS2,Action,2001,2,2",
            "C,7.0,Good,PS2,Action,2002,3,3",
        ]);

        let response = json_stats_handler(State(state)).await.unwrap();

        assert_eq!(
            body_string(response).await,
            "{\"2001\":2,\"2002\":1}"
        );
    }

    #[tokio::test]
    async fn json_dataset_lists_all_fields() {
        let state = state_with_rows(&["Okami,9.1,Amazing,PS2,Action,2006,9,19"]);

        let response = json_dataset_handler(State(state)).await.unwrap();
        let body = body_string(response).await;

        for key in [
            "title",
            "score",
            "score_phrase",
            "platform",
            "genre",
            "release_year",
            "release_month",
            "release_day",
        ] {
            assert!(body.contains(&format!("\"{key}\"")), "missing {key}");
        }
    }

    #[tokio::test]
    async fn home_shows_placeholder_without_data() {
        let state = state_with_rows(&[]);

        let response = home_handler(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("No data available"));
    }

    #[tokio::test]
    async fn home_renders_stats_table() {
        let state = state_with_rows(&[
            "A,9.0,Amazing,PS2,Action,2001,1,1",
            "B,8.0,Great,PS2,Action,2002,2,2",
        ]);

        let response = home_handler(State(state)).await.unwrap();
        let body = body_string(response).await;

        assert!(body.contains("<td>2001</td><td>1</td>"));
        assert!(body.contains("<td>2002</td><td>1</td>"));
    }

    #[tokio::test]
    async fn data_page_caps_at_one_hundred_rows() {
        let rows: Vec<String> = (0..150)
            .map(|i| format!("Game {i},7.0,Good,PS2,Action,2001,1,1"))
            .collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let state = state_with_rows(&refs);

        let response = data_handler(State(state)).await.unwrap();
        let body = body_string(response).await;

        assert_eq!(body.matches("<tr><td>Game ").count(), DATA_PAGE_ROWS);
    }

    #[tokio::test]
    async fn image_returns_svg_content_type() {
        let state = state_with_rows(&["A,9.0,Amazing,PS2,Action,2001,1,1"]);

        let response = image_handler(State(state)).await.unwrap();

        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let body = body_string(response).await;
        assert!(body.contains("<svg"));
        assert!(body.contains("width=\"100%\""));
    }
}
