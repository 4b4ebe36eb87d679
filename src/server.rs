//! HTTP server
//!
//! Routes:
//! - `GET /api/lastfm` - most recent track, fresh or cached
//! - `GET /api/config` - public client configuration

use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::config::ServerConfig;
use crate::error::{Result, SiteError};
use crate::now_playing::NowPlayingService;

/// Response header telling clients whether the track is fresh or cached
pub const CACHE_HEADER: &str = "x-cache";

/// JSON body for error responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
}

/// Public configuration the site's client code may read
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicConfig<'a> {
    lastfm_username: Option<&'a str>,
}

/// Builds every route served by the site backend
pub fn routes(
    service: Arc<NowPlayingService>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let lastfm = warp::path!("api" / "lastfm")
        .and(warp::get())
        .and(with_service(Arc::clone(&service)))
        .then(handle_lastfm);

    let public_config = warp::path!("api" / "config")
        .and(warp::get())
        .and(with_service(service))
        .map(handle_public_config);

    lastfm.or(public_config).unify()
}

fn with_service(
    service: Arc<NowPlayingService>,
) -> impl Filter<Extract = (Arc<NowPlayingService>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&service))
}

async fn handle_lastfm(service: Arc<NowPlayingService>) -> Response {
    match service.handle().await {
        Ok(now_playing) => {
            let source = if now_playing.is_stale() { "stale" } else { "fresh" };
            let reply = warp::reply::json(&now_playing.into_track());
            warp::reply::with_header(reply, CACHE_HEADER, source).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn handle_public_config(service: Arc<NowPlayingService>) -> Response {
    let body = PublicConfig {
        lastfm_username: service.config().public_username(),
    };
    warp::reply::json(&body).into_response()
}

fn error_response(err: &SiteError) -> Response {
    let status: StatusCode = err.status_code();
    let body = ErrorBody {
        status_code: status.as_u16(),
        message: err.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Runs the server until Ctrl-C
pub async fn serve(config: &ServerConfig, service: NowPlayingService) -> Result<()> {
    let routes = routes(Arc::new(service)).with(warp::log("sitekit::http"));

    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(config.bind, async {
        let _ = tokio::signal::ctrl_c().await;
    })?;

    info!("Listening on http://{}", addr);
    server.await;
    info!("Server stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheManager;
    use crate::config::LastfmConfig;
    use crate::lastfm::LastfmClient;
    use tempfile::TempDir;

    fn service(config: LastfmConfig, temp_dir: &TempDir) -> Arc<NowPlayingService> {
        Arc::new(NowPlayingService::new(
            config,
            LastfmClient::with_base_url("http://127.0.0.1:9/2.0/"),
            CacheManager::with_dir(temp_dir.path().to_path_buf()),
        ))
    }

    #[tokio::test]
    async fn test_missing_config_is_500() {
        let temp_dir = TempDir::new().unwrap();
        let filter = routes(service(LastfmConfig::default(), &temp_dir));

        let res = warp::test::request().path("/api/lastfm").reply(&filter).await;

        assert_eq!(res.status(), 500);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], "Last.fm API credentials not configured");
    }

    #[tokio::test]
    async fn test_public_config_hides_api_key() {
        let temp_dir = TempDir::new().unwrap();
        let config = LastfmConfig::new(Some("secret-key".to_string()), Some("someone".to_string()));
        let filter = routes(service(config, &temp_dir));

        let res = warp::test::request().path("/api/config").reply(&filter).await;

        assert_eq!(res.status(), 200);
        let body = String::from_utf8_lossy(res.body()).to_string();
        assert!(body.contains("\"lastfmUsername\":\"someone\""));
        assert!(!body.contains("secret-key"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let temp_dir = TempDir::new().unwrap();
        let filter = routes(service(LastfmConfig::default(), &temp_dir));

        let res = warp::test::request().path("/api/nope").reply(&filter).await;

        assert_eq!(res.status(), 404);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let filter = routes(service(LastfmConfig::default(), &temp_dir));

        let res = warp::test::request()
            .method("POST")
            .path("/api/lastfm")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), 405);
    }
}
