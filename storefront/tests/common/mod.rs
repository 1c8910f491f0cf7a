//! Test harness: an isolated server state and router per test

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use storefront::core::{Config, ServerState};
use storefront::mail::{self, MailOutbox};
use storefront::{api, seed};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub dir: TempDir,
    pub config: Config,
    pub state: ServerState,
    pub app: Router,
    pub outbox: Option<MailOutbox>,
}

impl TestApp {
    /// Fresh state with the bootstrap admin seeded and an empty catalog
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let (queue, outbox) = mail::channel(16);
        let state = ServerState::initialize(&config, queue).await.unwrap();
        seed::seed(&state.pool, &state.images, &config).await.unwrap();
        let app = api::build_app(&state);

        Self {
            dir,
            config,
            state,
            app,
            outbox: Some(outbox),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_multipart(&self, uri: &str, cookie: &str, form: Multipart) -> Response<Body> {
        let (content_type, body) = form.finish();
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Log in as the seeded admin and return the `Cookie` header value
    pub async fn login(&self) -> String {
        let response = self
            .post_form("/admin/login", "username=admin&password=admin123")
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

/// Minimal multipart/form-data encoder
pub struct Multipart {
    boundary: String,
    body: Vec<u8>,
}

impl Multipart {
    pub fn new() -> Self {
        Self {
            boundary: "storefront-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}

/// A complete add form for a donut item
pub fn donut_form() -> Multipart {
    Multipart::new()
        .text("name", "Glazed Donuts")
        .text("price", "2000")
        .text("description", "Classic glazed donuts")
        .text("serving_size", "6 pieces")
        .text("available", "on")
        .text("category", "Donuts")
        .text("ingredients", r#"["Flour","Sugar","Yeast"]"#)
        .text("allergens", r#"["Gluten","Dairy"]"#)
        .text("features", r#"["Freshly glazed"]"#)
}

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
