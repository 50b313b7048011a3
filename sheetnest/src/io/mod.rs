pub mod export;
pub mod ext_repr;
pub mod import;
pub mod svg;

#[doc(inline)]
pub use import::{DEFAULT_SPACING, Importer, NestingJob};
