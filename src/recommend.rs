use crate::api::{ApiError, SkincareApi};
use crate::config::Config;
use crate::i18n;
use crate::sequence::{RequestSequence, Ticket};
use actix::prelude::*;
use askama::Template;
use sk_types::{
    category_label, derive_notes, Badge, Note, Product, ProductList, RecommendationForm,
    RecommendationRequest,
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub ingredients: String,
    pub badges: Vec<Badge>,
    pub notes: Vec<Note>,
}

impl RecommendationCard {
    pub fn new(p: Product, config: &Config) -> Self {
        RecommendationCard {
            image: p.image_source(&config.default_image).to_string(),
            category: category_label(&p.kategori).into_owned(),
            badges: p.badges(),
            notes: derive_notes(&p),
            name: p.nama,
            brand: p.brand,
            ingredients: p.kandungan,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultState {
    #[default]
    Hidden,
    Loading,
    Loaded(Vec<RecommendationCard>),
    Empty,
    Failed,
}

impl ResultState {
    pub fn from_products(items: Vec<Product>, config: &Config) -> Self {
        if items.is_empty() {
            return Self::Empty;
        }
        Self::Loaded(
            items
                .into_iter()
                .map(|p| RecommendationCard::new(p, config))
                .collect(),
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The result box is hidden before the first submission and while a request is in flight.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden | Self::Loading)
    }

    pub fn cards(&self) -> &[RecommendationCard] {
        match self {
            Self::Loaded(cards) => cards,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(i18n::NO_RECOMMENDATIONS),
            Self::Failed => Some(i18n::RECOMMENDATIONS_FAILED),
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "recommend/results.html")]
pub struct RecommendView<'a> {
    results: &'a ResultState,
    warning: &'a str,
}

pub fn render(results: &ResultState) -> Result<String, askama::Error> {
    RecommendView {
        results,
        warning: i18n::WARNING,
    }
    .render()
}

pub struct RecommendController {
    api: Arc<dyn SkincareApi>,
    config: Arc<Config>,
    results: ResultState,
    sequence: RequestSequence,
    in_flight: Option<SpawnHandle>,
}

impl RecommendController {
    pub fn new(api: Arc<dyn SkincareApi>, config: Arc<Config>) -> Self {
        Self {
            api,
            config,
            results: ResultState::Hidden,
            sequence: RequestSequence::default(),
            in_flight: None,
        }
    }

    fn apply(&mut self, ticket: Ticket, res: Result<ProductList, ApiError>) {
        if !self.sequence.is_current(ticket) {
            log::debug!("Ignoring stale recommendation response {ticket:?}");
            return;
        }
        self.in_flight = None;
        self.results = match res {
            Ok(list) => ResultState::from_products(list.items, &self.config),
            Err(err) => {
                log::warn!("Unable to load recommendations: {err}");
                ResultState::Failed
            }
        };
    }
}

impl Actor for RecommendController {
    type Context = Context<Self>;
}

/// Form submission; the browser's own submission is never performed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Submit(pub RecommendationForm);

#[derive(Message)]
#[rtype(result = "ResultState")]
pub struct GetResults;

#[derive(Message)]
#[rtype(result = "Result<String, askama::Error>")]
pub struct GetView;

impl Handler<Submit> for RecommendController {
    type Result = ();

    fn handle(&mut self, Submit(form): Submit, ctx: &mut Self::Context) {
        if let Some(handle) = self.in_flight.take() {
            ctx.cancel_future(handle);
        }
        let ticket = self.sequence.issue();
        self.results = ResultState::Loading;
        let request = RecommendationRequest::from(form);
        let api = self.api.clone();
        let handle = ctx.spawn(
            async move { api.recommend(request).await }
                .into_actor(self)
                .map(move |res, act, _| act.apply(ticket, res)),
        );
        self.in_flight = Some(handle);
    }
}

impl Handler<GetResults> for RecommendController {
    type Result = MessageResult<GetResults>;

    fn handle(&mut self, _: GetResults, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.results.clone())
    }
}

impl Handler<GetView> for RecommendController {
    type Result = Result<String, askama::Error>;

    fn handle(&mut self, _: GetView, _: &mut Self::Context) -> Self::Result {
        render(&self.results)
    }
}
