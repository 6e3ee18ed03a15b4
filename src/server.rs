// server.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Error, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::delegate::Translate;
use crate::error::TranslationError;
use crate::handler::{self, TranslationRequest, TranslationResponse};
use crate::language::LanguageCode;

type SharedTranslator = Arc<dyn Translate>;

/// HTTP front-end sharing one translator between all requests.
pub struct Server {
    inner: SharedTranslator,
}

impl Server {
    pub fn new<T: Translate + 'static>(translator: T) -> Self {
        Self {
            inner: Arc::new(translator),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/translate", post(translate).layer(cors))
            .route("/languages", get(languages))
            .layer(TraceLayer::new_for_http())
            .with_state(self.inner.clone())
    }

    pub async fn serve<F>(self, addr: SocketAddr, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await?;
        info!("listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await
            .map_err(Error::from)
    }
}

async fn translate(
    State(translator): State<SharedTranslator>,
    Json(req): Json<TranslationRequest>,
) -> (StatusCode, Json<TranslationResponse>) {
    // Generation blocks until the model returns.
    let res = tokio::task::spawn_blocking(move || handler::translate(&translator, &req))
        .await
        .unwrap_or_else(|e| Err(TranslationError::Backend(e.into())));

    let status = match &res {
        Ok(_) => StatusCode::OK,
        Err(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
        Err(e) => {
            error!("translation failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(res.into()))
}

#[derive(Debug, Serialize)]
struct Language {
    code: &'static str,
    name: &'static str,
}

async fn languages() -> Json<Vec<Language>> {
    Json(
        LanguageCode::ALL
            .into_iter()
            .map(|l| Language {
                code: l.code(),
                name: l.name(),
            })
            .collect(),
    )
}
