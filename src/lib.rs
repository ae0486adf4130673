#![deny(clippy::unwrap_used)]

pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod i18n;
pub mod nav;
pub mod page;
pub mod recommend;
pub mod sequence;

pub use api::{ApiError, HttpApi, SkincareApi};
pub use config::Config;
pub use page::{Page, PageKind};
