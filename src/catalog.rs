use crate::api::{ApiError, SkincareApi};
use crate::config::Config;
use crate::i18n;
use crate::sequence::{RequestSequence, Ticket};
use actix::prelude::*;
use askama::Template;
use log_error::LogError;
use sk_types::{category_label, Badge, FilterCriteria, FilterForm, FilterMode, Product, ProductList};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub ingredients: String,
    pub badges: Vec<Badge>,
    pub description: String,
}

impl ProductCard {
    pub fn new(p: Product, config: &Config) -> Self {
        ProductCard {
            image: p.image_source(&config.default_image).to_string(),
            ingredients: p.ingredient_preview(config.ingredient_preview_tokens),
            category: category_label(&p.kategori).into_owned(),
            badges: p.badges(),
            name: p.nama,
            brand: p.brand,
            description: p.manfaat,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GridState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<ProductCard>),
    Empty,
    Failed,
}

impl GridState {
    pub fn from_products(items: Vec<Product>, config: &Config) -> Self {
        if items.is_empty() {
            return Self::Empty;
        }
        Self::Loaded(
            items
                .into_iter()
                .map(|p| ProductCard::new(p, config))
                .collect(),
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Loaded(cards) => cards,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(i18n::NO_PRODUCTS),
            Self::Failed => Some(i18n::PRODUCTS_FAILED),
            _ => None,
        }
    }
}

/// Description modal shared by every card of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    pub open: bool,
    pub text: String,
}

#[derive(Template)]
#[template(path = "catalog/grid.html")]
pub struct CatalogView<'a> {
    grid: &'a GridState,
    modal: &'a Modal,
    brands: &'a [String],
    view_description: &'a str,
}

pub fn render(grid: &GridState, modal: &Modal, brands: &[String]) -> Result<String, askama::Error> {
    CatalogView {
        grid,
        modal,
        brands,
        view_description: i18n::VIEW_DESCRIPTION,
    }
    .render()
}

pub struct CatalogController {
    api: Arc<dyn SkincareApi>,
    config: Arc<Config>,
    mode: FilterMode,
    grid: GridState,
    modal: Modal,
    brands: Vec<String>,
    sequence: RequestSequence,
    in_flight: Option<SpawnHandle>,
}

impl CatalogController {
    pub fn new(api: Arc<dyn SkincareApi>, config: Arc<Config>) -> Self {
        Self {
            mode: config.filter_mode,
            api,
            config,
            grid: GridState::Idle,
            modal: Modal::default(),
            brands: vec![],
            sequence: RequestSequence::default(),
            in_flight: None,
        }
    }

    fn load(&mut self, criteria: FilterCriteria, limit: Option<usize>, ctx: &mut Context<Self>) {
        if let Some(handle) = self.in_flight.take() {
            log::debug!("Dropping in-flight product request");
            ctx.cancel_future(handle);
        }
        let ticket = self.sequence.issue();
        self.grid = GridState::Loading;
        let query = criteria.to_query(self.mode);
        let api = self.api.clone();
        let handle = ctx.spawn(
            async move { api.list_products(query).await }
                .into_actor(self)
                .map(move |res, act, _| act.apply(ticket, res, limit)),
        );
        self.in_flight = Some(handle);
    }

    fn apply(&mut self, ticket: Ticket, res: Result<ProductList, ApiError>, limit: Option<usize>) {
        if !self.sequence.is_current(ticket) {
            log::debug!("Ignoring stale product response {ticket:?}");
            return;
        }
        self.in_flight = None;
        self.grid = match res {
            Ok(ProductList { mut items, .. }) => {
                if let Some(limit) = limit.filter(|l| *l > 0) {
                    items.truncate(limit);
                }
                GridState::from_products(items, &self.config)
            }
            Err(err) => {
                log::warn!("Unable to load products: {err}");
                GridState::Failed
            }
        };
    }
}

impl Actor for CatalogController {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Context<Self>) {
        let api = self.api.clone();
        ctx.spawn(
            async move { api.brands().await }
                .into_actor(self)
                .map(|res, act, _| {
                    if let Some(brands) = res.log_error("Unable to load brands") {
                        act.brands = brands;
                    }
                }),
        );
    }
}

/// Filter button activation.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ApplyFilter(pub FilterForm);

/// Initial load on page mount; `limit` caps the number of cards shown, `0` means no cap.
#[derive(Message)]
#[rtype(result = "()")]
pub struct AutoLoad {
    pub form: FilterForm,
    pub limit: Option<usize>,
}

/// "View description" on the card at this position.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ShowDescription(pub usize);

#[derive(Message)]
#[rtype(result = "()")]
pub struct CloseModal;

#[derive(Message)]
#[rtype(result = "GridState")]
pub struct GetGrid;

#[derive(Message)]
#[rtype(result = "Modal")]
pub struct GetModal;

#[derive(Message)]
#[rtype(result = "Vec<String>")]
pub struct GetBrands;

#[derive(Message)]
#[rtype(result = "Result<String, askama::Error>")]
pub struct GetView;

impl Handler<ApplyFilter> for CatalogController {
    type Result = ();

    fn handle(&mut self, ApplyFilter(form): ApplyFilter, ctx: &mut Self::Context) {
        self.load(form.criteria(), None, ctx);
    }
}

impl Handler<AutoLoad> for CatalogController {
    type Result = ();

    fn handle(&mut self, AutoLoad { form, limit }: AutoLoad, ctx: &mut Self::Context) {
        self.load(form.criteria(), limit, ctx);
    }
}

impl Handler<ShowDescription> for CatalogController {
    type Result = ();

    fn handle(&mut self, ShowDescription(index): ShowDescription, _: &mut Self::Context) {
        match self.grid.cards().get(index) {
            Some(card) => {
                self.modal.text = card.description.clone();
                self.modal.open = true;
            }
            None => log::warn!("No product card at position {index}"),
        }
    }
}

impl Handler<CloseModal> for CatalogController {
    type Result = ();

    fn handle(&mut self, _: CloseModal, _: &mut Self::Context) {
        self.modal.open = false;
    }
}

impl Handler<GetGrid> for CatalogController {
    type Result = MessageResult<GetGrid>;

    fn handle(&mut self, _: GetGrid, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.grid.clone())
    }
}

impl Handler<GetModal> for CatalogController {
    type Result = MessageResult<GetModal>;

    fn handle(&mut self, _: GetModal, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.modal.clone())
    }
}

impl Handler<GetBrands> for CatalogController {
    type Result = MessageResult<GetBrands>;

    fn handle(&mut self, _: GetBrands, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.brands.clone())
    }
}

impl Handler<GetView> for CatalogController {
    type Result = Result<String, askama::Error>;

    fn handle(&mut self, _: GetView, _: &mut Self::Context) -> Self::Result {
        render(&self.grid, &self.modal, &self.brands)
    }
}
