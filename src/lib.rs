// pdf2txt - batch PDF to flat text conversion
pub mod batch;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pdf_extraction;
pub mod report;

pub use batch::{convert_document, discover, output_path, run};
pub use config::{Config, ErrorPolicy};
pub use error::{ConfigError, ExtractError};
pub use pdf_extraction::{LopdfExtractor, TextExtractor};
pub use report::{BatchReport, Converted, Failure};
