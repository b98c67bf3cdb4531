// artisan_core/src/catalog/mod.rs

//! Product records and the pure merge logic applied to them.

pub mod merge;
pub mod product;
pub mod reference;
pub mod translations;
pub mod upload;

pub use merge::{merge_upload, MergedContent};
pub use product::{ContentField, Product, Provenance};
pub use reference::{language_name, Category, Language, CATEGORIES, LANGUAGES};
pub use translations::{apply_translation, ContentType, Translations};
pub use upload::{ListingError, UploadFields};
