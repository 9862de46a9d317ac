//! HTTP handler functions for the theft map server.

use std::path::Path;

use actix_web::{HttpResponse, web};
use theft_map_chart::dataset::load_series;
use theft_map_chart::page::load_and_render;
use theft_map_server_models::{ApiBarDatum, ApiError, ApiHealth};

use crate::AppState;

/// `GET /`
///
/// Renders the page. A dataset that fails to load leaves its surfaces
/// empty rather than failing the request.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let html = load_and_render(&state.config).await;
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/series`
///
/// Returns the yearly series drawn by the bar chart.
pub async fn series(state: web::Data<AppState>) -> HttpResponse {
    let bar = &state.config.bar;
    match load_series(Path::new(&bar.data_path), &bar.category, &bar.label_prefix).await {
        Ok(series) => {
            let api_series: Vec<ApiBarDatum> =
                series.into_iter().map(ApiBarDatum::from).collect();
            HttpResponse::Ok().json(api_series)
        }
        Err(e) => {
            log::error!("Failed to load series from {}: {e}", bar.data_path);
            HttpResponse::InternalServerError().json(ApiError {
                error: "Failed to load series".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use theft_map_chart::config::default_config;
    use theft_map_chart::models::ChartConfig;

    use super::*;
    use crate::configure;

    const STATISTICS: &str = r#"{
        "Respuesta": { "Datos": { "Metricas": [ { "Datos": [
            { "Agno": 2020, "Parametro": "Sustracciones de vehículos", "Valor": 5000 },
            { "Agno": 2020, "Parametro": "Hurtos", "Valor": 40000 },
            { "Agno": 2021, "Parametro": "Sustracciones de vehículos", "Valor": 6200 }
        ] } ] } }
    }"#;

    fn missing_data_config() -> ChartConfig {
        let mut config = default_config();
        config.map.data_path = "/no/such/regions.geojson".to_string();
        config.bar.data_path = "/no/such/stats.json".to_string();
        config
    }

    fn state(config: ChartConfig) -> web::Data<AppState> {
        web::Data::new(AppState {
            config: Arc::new(config),
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(
            App::new()
                .app_data(state(default_config()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(body.healthy);
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn index_renders_empty_surfaces_when_data_is_missing() {
        let app = test::init_service(
            App::new()
                .app_data(state(missing_data_config()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("<div id=\"map\"></div>"));
        assert!(html.contains("<div id=\"bar-chart\"></div>"));
    }

    #[actix_web::test]
    async fn only_page_and_api_routes_are_served() {
        let app = test::init_service(
            App::new()
                .app_data(state(missing_data_config()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/datasets/stats.json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn series_fails_with_json_error() {
        let app = test::init_service(
            App::new()
                .app_data(state(missing_data_config()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/series").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Failed to load series");
    }

    #[actix_web::test]
    async fn series_returns_filtered_bars() {
        let path = std::env::temp_dir().join(format!(
            "theft_map_server_series_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, STATISTICS).unwrap();

        let mut config = missing_data_config();
        config.bar.data_path = path.to_string_lossy().into_owned();
        let app = test::init_service(App::new().app_data(state(config)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/series").to_request();
        let body: Vec<ApiBarDatum> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            [
                ApiBarDatum {
                    label: "1er T - 2020".to_string(),
                    value: 5000.0,
                },
                ApiBarDatum {
                    label: "1er T - 2021".to_string(),
                    value: 6200.0,
                },
            ]
        );

        std::fs::remove_file(&path).unwrap();
    }
}
