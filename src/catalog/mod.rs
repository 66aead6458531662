//! Public façade for the catalog layer.

pub mod error;
pub mod expansion;
pub mod query;
pub mod record;
pub mod session;
pub mod sources;
pub mod types;
pub mod view;


pub use error::{CatalogError, CatalogResult};
pub use query::{AlcoholFilter, QuerySpec};
pub use record::DrinkRecord;
pub use session::{CatalogSession, SessionSettings};
pub use sources::{DrinkSource, HttpSource};
pub use types::{QueryOutcome, QueryStatus};
pub use view::{DetailView, DrinkCard, DrinkDetail, GridView, ThemeView};
