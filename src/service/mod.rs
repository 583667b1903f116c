pub mod category;
pub mod product;
pub mod stock;
pub mod version;

pub use category::{CategoryService, ROOT_CATEGORY_ID};
pub use product::ProductService;
pub use stock::{StockService, ITEMS_PER_PAGE};
pub use version::VersionService;
