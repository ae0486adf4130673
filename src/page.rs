use crate::api::SkincareApi;
use crate::catalog::{self, AutoLoad, CatalogController, GridState};
use crate::chat::{self, Bubble, ChatController, ChatSession};
use crate::config::Config;
use crate::nav::NavChrome;
use crate::recommend::{self, RecommendController, ResultState};
use actix::prelude::*;
use sk_types::FilterForm;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Auto-load behaviour selected by the page's body class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Produk,
    Other,
}

impl PageKind {
    /// `body_class` is the full class attribute, e.g. `"page-home dark"`.
    pub fn from_body_class(body_class: &str) -> Self {
        let mut classes = body_class.split_whitespace();
        if classes.clone().any(|c| c == "page-home") {
            Self::Home
        } else if classes.any(|c| c == "page-produk") {
            Self::Produk
        } else {
            Self::Other
        }
    }
}

pub struct Page {
    pub kind: PageKind,
    pub catalog: Addr<CatalogController>,
    pub recommend: Addr<RecommendController>,
    pub chat: Addr<ChatController>,
    pub nav: NavChrome,
}

impl Page {
    /// Starts every controller once and issues the page's automatic catalog load.
    /// Must be called inside a running actix system.
    pub fn mount(
        config: Arc<Config>,
        api: Arc<dyn SkincareApi>,
        body_class: &str,
        form: FilterForm,
    ) -> Self {
        let kind = PageKind::from_body_class(body_class);
        log::info!("Mounting {kind:?} page");
        let catalog = CatalogController::new(api.clone(), config.clone()).start();
        let recommend = RecommendController::new(api.clone(), config.clone()).start();
        let chat = ChatController::new(api, ChatSession::start()).start();
        match kind {
            PageKind::Home => catalog.do_send(AutoLoad {
                form,
                limit: Some(config.home_product_limit),
            }),
            PageKind::Produk => catalog.do_send(AutoLoad { form, limit: None }),
            PageKind::Other => (),
        }
        Self {
            kind,
            catalog,
            recommend,
            chat,
            nav: NavChrome::new(config.mobile_breakpoint),
        }
    }

    pub async fn catalog_settled(&self) -> Result<GridState, MailboxError> {
        loop {
            let grid = self.catalog.send(catalog::GetGrid).await?;
            if !grid.is_loading() {
                return Ok(grid);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn recommend_settled(&self) -> Result<ResultState, MailboxError> {
        loop {
            let results = self.recommend.send(recommend::GetResults).await?;
            if !results.is_loading() {
                return Ok(results);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn chat_settled(&self) -> Result<Vec<Bubble>, MailboxError> {
        loop {
            let transcript = self.chat.send(chat::GetTranscript).await?;
            if !transcript.iter().any(|b| matches!(b, Bubble::Typing(_))) {
                return Ok(transcript);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
