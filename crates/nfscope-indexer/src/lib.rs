//! File scanning, unit classification and impact resolution

pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod extractors;
pub mod locator;
pub mod resolver;
pub mod source;


#[cfg(test)]
pub mod test_utils;

pub use classifier::{classify, classify_file, declaration};
pub use config::include_map::{load_include_mapping, parse_include_mapping, IncludeFileError};
pub use coordinator::{Coordinator, ImpactReport, ImpactRequest};
pub use extractors::{extractor_for, EdgeExtractor};
pub use locator::Locator;
pub use resolver::ImpactResolver;
