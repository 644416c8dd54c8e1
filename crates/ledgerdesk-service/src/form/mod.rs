//! Form builder (admin) and form fill (client) services.

pub mod builder;
pub mod fill;

pub use builder::{CreateFormRequest, FormBuilderService, UpdateFormRequest};
pub use fill::FormFillService;
