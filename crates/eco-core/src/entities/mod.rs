//! Entity structs for all EcoInspect domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `eco-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod establishment;
mod inspection;
mod question;
mod recommendation;
mod response;
mod result;

pub use establishment::Establishment;
pub use inspection::Inspection;
pub use question::{
    ChecklistQuestion, ConditionalField, ConditionalLogic, QuestionOption, is_expiry_field_name,
    labels_match,
};
pub use recommendation::{Recommendation, RecommendationFlags};
pub use response::{ChecklistResponse, ConditionalFieldResponse, UtilityRecord};
pub use result::InspectionResult;
