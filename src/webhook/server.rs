// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP(S) server dispatching admission reviews to the workload handlers

use crate::config::Config;
use crate::constants::paths;
use crate::error::Result;
use crate::webhook::admission::handle_review_body;
use crate::webhook::{tls, WebhookState, Workload};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, warn};

pub struct WebhookServer {
    bind_address: SocketAddr,
    tls_acceptor: Option<TlsAcceptor>,
    state: Arc<WebhookState>,
}

impl WebhookServer {
    /// Create the server, loading the TLS material when configured
    pub fn new(config: &Config) -> Result<Self> {
        let tls_acceptor = match (&config.tls_cert_file, &config.tls_key_file) {
            (Some(cert), Some(key)) => {
                let server_config = tls::load_server_config(cert, key)?;
                Some(TlsAcceptor::from(Arc::new(server_config)))
            }
            _ => {
                warn!("No TLS certificate configured, serving plain HTTP");
                None
            }
        };

        Ok(Self {
            bind_address: config.bind_address,
            tls_acceptor,
            state: Arc::new(WebhookState::new(config.csi.clone())),
        })
    }

    /// Bind the configured address and serve until `shutdown` completes
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let listener = TcpListener::bind(self.bind_address).await?;
        self.run_on(listener, shutdown).await
    }

    /// Serve connections from an already bound listener until `shutdown` completes
    pub async fn run_on(self, listener: TcpListener, shutdown: impl Future<Output = ()>) -> Result<()> {
        info!(
            "Webhook server listening on {} ({})",
            listener.local_addr()?,
            if self.tls_acceptor.is_some() { "https" } else { "http" }
        );

        tokio::pin!(shutdown);
        loop {
            let (stream, remote_addr) = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping webhook server");
                    return Ok(());
                }
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                },
            };

            let state = self.state.clone();
            let tls_acceptor = self.tls_acceptor.clone();
            tokio::spawn(async move {
                match tls_acceptor {
                    Some(acceptor) => match acceptor.accept(stream).await {
                        Ok(tls_stream) => serve_connection(tls_stream, state, remote_addr).await,
                        Err(e) => debug!("TLS handshake with {} failed: {}", remote_addr, e),
                    },
                    None => serve_connection(stream, state, remote_addr).await,
                }
            });
        }
    }
}

async fn serve_connection<IO>(io: IO, state: Arc<WebhookState>, remote_addr: SocketAddr)
where
    IO: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let service = service_fn(move |request: Request<Incoming>| {
        let state = state.clone();
        async move { Ok::<_, Infallible>(route(&state, request).await) }
    });

    if let Err(e) = http1::Builder::new()
        .serve_connection(TokioIo::new(io), service)
        .await
    {
        debug!("Failed to serve connection from {}: {}", remote_addr, e);
    }
}

/// Dispatch a request to the matching endpoint
pub async fn route<B>(state: &WebhookState, request: Request<B>) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    match (&method, path.as_str()) {
        (&Method::GET, paths::HEALTHZ) => text(StatusCode::OK, "ok"),
        (&Method::POST, paths::MUTATE_DEPLOYMENT) => review::<Deployment, _>(state, request).await,
        (&Method::POST, paths::MUTATE_STATEFULSET) => review::<StatefulSet, _>(state, request).await,
        (_, paths::HEALTHZ | paths::MUTATE_DEPLOYMENT | paths::MUTATE_STATEFULSET) => {
            text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
        }
        _ => {
            debug!("No route for {} {}", method, path);
            text(StatusCode::NOT_FOUND, "not found")
        }
    }
}

async fn review<W, B>(state: &WebhookState, request: Request<B>) -> Response<Full<Bytes>>
where
    W: Workload,
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let body = match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return text(StatusCode::BAD_REQUEST, "failed to read request body");
        }
    };

    let review = handle_review_body::<W>(&state.config, &body);
    match serde_json::to_vec(&review) {
        Ok(json) => {
            let mut response = Response::new(Full::new(Bytes::from(json)));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            warn!("Failed to encode admission review: {}", e);
            text(StatusCode::INTERNAL_SERVER_ERROR, "failed to encode admission review")
        }
    }
}

fn text(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        admission_review_json, make_container, make_csi_config, make_deployment, make_meta,
        make_pod_spec,
    };
    use kube::core::admission::AdmissionReview;
    use kube::core::DynamicObject;
    use std::collections::BTreeMap;
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn state() -> WebhookState {
        WebhookState::new(make_csi_config())
    }

    fn request(method: Method, path: &str, body: impl Into<Bytes>) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(body.into()))
            .unwrap()
    }

    fn managed_deployment_review() -> String {
        let deployment = make_deployment(
            make_meta(
                Some("unittest"),
                Some(BTreeMap::from([(
                    "op.csi.cert-manager.io".to_string(),
                    "true".to_string(),
                )])),
            ),
            make_pod_spec(vec![make_container("main", None)], None),
        );
        admission_review_json(
            "Deployment",
            "deployments",
            "unittest",
            serde_json::to_value(&deployment).unwrap(),
        )
        .to_string()
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_route_healthz() {
        let response = route(&state(), request(Method::GET, "/healthz", "")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, Bytes::from_static(b"ok"));
    }

    #[tokio::test]
    async fn test_route_unknown_path() {
        let response = route(&state(), request(Method::POST, "/mutate-v1-pod", "{}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_route_wrong_method() {
        let response = route(&state(), request(Method::GET, "/mutate-v1-deployment", "")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_route_deployment_review() {
        let response = route(
            &state(),
            request(Method::POST, "/mutate-v1-deployment", managed_deployment_review()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let review: AdmissionReview<DynamicObject> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        let response = review.response.unwrap();
        assert!(response.allowed);
        assert!(response.patch.is_some());
    }

    #[tokio::test]
    async fn test_route_statefulset_rejects_deployment_object() {
        let response = route(
            &state(),
            request(Method::POST, "/mutate-v1-statefulset", managed_deployment_review()),
        )
        .await;

        // The HTTP exchange succeeds, the decision travels in the review
        assert_eq!(response.status(), StatusCode::OK);
        let review: AdmissionReview<DynamicObject> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        let response = review.response.unwrap();
        assert!(!response.allowed);
        assert_eq!(response.result.code, 400);
    }

    #[tokio::test]
    async fn test_serves_admission_review_over_http() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let config = Config {
            bind_address: addr,
            tls_cert_file: None,
            tls_key_file: None,
            csi: make_csi_config(),
        };
        let server = WebhookServer::new(&config).unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run_on(listener, async {
            let _ = shutdown_rx.await;
        }));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(conn);

        let req = Request::builder()
            .method(Method::POST)
            .uri("/mutate-v1-deployment")
            .header("host", "localhost")
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(managed_deployment_review())))
            .unwrap();
        let response = sender.send_request(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let review: AdmissionReview<DynamicObject> = serde_json::from_slice(&bytes).unwrap();
        assert!(review.response.unwrap().allowed);

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
