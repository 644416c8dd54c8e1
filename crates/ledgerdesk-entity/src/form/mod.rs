//! Form builder entities: forms, polymorphic fields, responses.

pub mod field;
pub mod model;
pub mod response;
pub mod validate;

pub use field::{
    FieldDefinition, FieldKind, FormField, InputField, InputType, MatrixField,
    MultipleChoiceField, NetPromoterScoreField, RatingField, SelectionField, SeparatorField,
};
pub use model::{ClientFormSummary, CreateForm, Form, FormDetail, FormSummary, UpdateForm};
pub use response::{FormAnswer, FormResponse, ResponseDetail, ResponseWithUser};
