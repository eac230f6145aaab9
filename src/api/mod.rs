pub mod price_file;
pub mod sheet;
pub mod source;
pub mod utils;
pub mod yahoo;

pub use price_file::PriceFileSource;
pub use sheet::{SheetRows, SheetSource};
pub use source::{LatestCloses, PriceSource};
pub use yahoo::YahooPriceSource;
