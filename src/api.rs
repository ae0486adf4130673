use async_trait::async_trait;
use derive_more::{Display, Error};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sk_types::chat::{ChatReply, ChatRequest};
use sk_types::{ProductList, ProductQuery, RecommendationRequest};
use url::Url;
use uuid::Uuid;

/// Chat message the backend treats as "forget this conversation".
pub const RESET_MESSAGE: &str = "reset";

#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display("Request failed: {_0}")]
    Transport(reqwest::Error),
    #[error(ignore)]
    #[display("Backend responded with {_0}")]
    Status(StatusCode),
    #[display("Unable to decode response: {_0}")]
    Decode(reqwest::Error),
    #[display("Invalid endpoint: {_0}")]
    Url(url::ParseError),
}

/// Backend REST API the controllers talk to.
#[async_trait]
pub trait SkincareApi: Send + Sync {
    async fn list_products(&self, query: ProductQuery) -> Result<ProductList, ApiError>;
    async fn recommend(&self, request: RecommendationRequest) -> Result<ProductList, ApiError>;
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ApiError>;
    /// Clears the backend's state for `session_id`; the id itself stays valid.
    async fn reset_chat(&self, session_id: Uuid) -> Result<ChatReply, ApiError>;
    async fn brands(&self) -> Result<Vec<String>, ApiError>;
}

#[derive(Deserialize)]
struct BrandList {
    #[serde(default)]
    brands: Vec<String>,
}

pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base: Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(ApiError::Url)
    }

    async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        resp.json::<T>().await.map_err(ApiError::Decode)
    }
}

#[async_trait]
impl SkincareApi for HttpApi {
    async fn list_products(&self, query: ProductQuery) -> Result<ProductList, ApiError> {
        let url = self.endpoint("api/produk")?;
        log::debug!("GET {url} {:?}", query.0);
        let resp = self
            .client
            .get(url)
            .query(&query.0)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::read(resp).await
    }

    async fn recommend(&self, request: RecommendationRequest) -> Result<ProductList, ApiError> {
        let url = self.endpoint("api/rekomendasi")?;
        log::debug!("POST {url} {request:?}");
        let resp = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::read(resp).await
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        let url = self.endpoint("api/chatbot")?;
        let resp = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::read(resp).await
    }

    async fn reset_chat(&self, session_id: Uuid) -> Result<ChatReply, ApiError> {
        log::debug!("Resetting chat session {session_id}");
        self.chat(ChatRequest {
            session_id,
            message: RESET_MESSAGE.to_string(),
        })
        .await
    }

    async fn brands(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("api/brands")?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::read::<BrandList>(resp).await.map(|b| b.brands)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::{Data, Json};
    use actix_web::{get, post, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::{json, Value};
    use sk_types::{FilterCriteria, FilterMode, Preferences};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorded {
        queries: Mutex<Vec<String>>,
        bodies: Mutex<Vec<Value>>,
    }

    #[get("/api/produk")]
    async fn produk(req: HttpRequest, rec: Data<Recorded>) -> HttpResponse {
        rec.queries
            .lock()
            .expect("lock")
            .push(req.query_string().to_string());
        HttpResponse::Ok().json(json!({
            "items": [
                {"nama": "Hydrating Toner", "brand": "Acme", "kategori": "toner",
                 "kandungan": "Aqua, Glycerin", "alcohol_free": true,
                 "fragrance_free": true, "non_comedogenic": false, "image_url": ""},
                {"nama": "Daily Serum", "brand": "Acme", "kategori": "serum"}
            ],
            "count": 2
        }))
    }

    #[post("/api/rekomendasi")]
    async fn rekomendasi(body: Json<Value>, rec: Data<Recorded>) -> HttpResponse {
        rec.bodies.lock().expect("lock").push(body.into_inner());
        HttpResponse::Ok().json(json!({"items": []}))
    }

    #[post("/api/chatbot")]
    async fn chatbot(body: Json<Value>, rec: Data<Recorded>) -> HttpResponse {
        let message = body["message"].as_str().unwrap_or_default().to_string();
        let session_id = body["session_id"].clone();
        rec.bodies.lock().expect("lock").push(body.into_inner());
        HttpResponse::Ok().json(json!({"reply": format!("**{message}**"), "session_id": session_id}))
    }

    #[get("/api/brands")]
    async fn brands() -> HttpResponse {
        HttpResponse::Ok().json(json!({"brands": ["Acme", "Wardah"]}))
    }

    fn start_backend() -> (Url, Data<Recorded>) {
        let recorded = Data::new(Recorded::default());
        let data = recorded.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .service(produk)
                .service(rekomendasi)
                .service(chatbot)
                .service(brands)
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind test backend");
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());
        let url = Url::parse(&format!("http://{addr}/")).expect("valid url");
        (url, recorded)
    }

    #[actix_rt::test]
    async fn lists_products_with_query() {
        let (url, recorded) = start_backend();
        let api = HttpApi::new(url).expect("client");
        let criteria = FilterCriteria {
            query: "serum".to_string(),
            brands: vec!["Acme".to_string(), "Wardah".to_string()],
            categories: vec![],
            preferences: Preferences {
                alcohol_free: true,
                ..Default::default()
            },
        };
        let list = api
            .list_products(criteria.to_query(FilterMode::Multi))
            .await
            .expect("product list");
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[1].kandungan, "");
        assert_eq!(
            recorded.queries.lock().expect("lock").as_slice(),
            &["q=serum&brand=Acme&brand=Wardah&alcohol_free=true".to_string()]
        );
    }

    #[actix_rt::test]
    async fn posts_json_bodies() {
        let (url, recorded) = start_backend();
        let api = HttpApi::new(url).expect("client");
        let request = RecommendationRequest {
            category: "serum".to_string(),
            jenis_kulit: "oily".to_string(),
            masalah_kulit: "acne".to_string(),
            preferences: Preferences::default(),
        };
        assert!(api.recommend(request).await.expect("recommendations").items.is_empty());

        let session_id = Uuid::new_v4();
        let reply = api
            .chat(ChatRequest {
                session_id,
                message: "halo".to_string(),
            })
            .await
            .expect("chat reply");
        assert_eq!(reply.reply.as_deref(), Some("**halo**"));
        assert_eq!(reply.session_id, Some(session_id.to_string()));

        let bodies = recorded.bodies.lock().expect("lock");
        assert_eq!(bodies[0]["preferences"]["non_comedogenic"], json!(false));
        assert_eq!(bodies[1]["session_id"], json!(session_id.to_string()));
        drop(bodies);

        let reply = api.reset_chat(session_id).await.expect("reset");
        assert_eq!(reply.reply.as_deref(), Some("**reset**"));
        let bodies = recorded.bodies.lock().expect("lock");
        assert_eq!(bodies.len(), 3);
        assert_eq!(bodies[2], json!({"session_id": session_id.to_string(), "message": "reset"}));
        drop(bodies);
        assert_eq!(api.brands().await.expect("brands"), vec!["Acme", "Wardah"]);
    }

    #[actix_rt::test]
    async fn error_status_is_failure() {
        let (url, _) = start_backend();
        let api = HttpApi::new(url.join("missing/").expect("joinable")).expect("client");
        let err = api
            .list_products(ProductQuery::default())
            .await
            .expect_err("404 must fail");
        assert!(matches!(err, ApiError::Status(StatusCode::NOT_FOUND)));
    }

    #[actix_rt::test]
    async fn unreachable_backend_is_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let api = HttpApi::new(Url::parse(&format!("http://{addr}/")).expect("valid url"))
            .expect("client");
        let err = api
            .list_products(ProductQuery::default())
            .await
            .expect_err("closed port must fail");
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
