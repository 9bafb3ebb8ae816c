pub mod etl;
pub mod http;
pub mod listing;
pub mod output;
pub mod pipeline;
pub mod product;

pub use crate::domain::model::{RawProduct, ScrapeReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
