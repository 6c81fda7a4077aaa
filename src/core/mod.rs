pub mod editor;
pub mod encoding;
pub mod generator;
pub mod render;
pub mod store;

pub use crate::domain::model::{Association, AssociationType, Framework, Service, ServiceContext};
pub use crate::domain::ports::{ConfigProvider, DiagramFetcher, Prompter, Storage};
pub use crate::utils::error::Result;
