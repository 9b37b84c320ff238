//! ID prefixes for database-generated identifiers.
//!
//! IDs look like `qst-a3f8b2c1`: a three-letter prefix, a dash, and eight
//! lowercase hex characters produced by `randomblob(4)`.

pub const PREFIX_ESTABLISHMENT: &str = "est";
pub const PREFIX_INSPECTION: &str = "ins";
pub const PREFIX_QUESTION: &str = "qst";
pub const PREFIX_RESULT: &str = "res";
pub const PREFIX_RESPONSE: &str = "rsp";
pub const PREFIX_UTILITY: &str = "utl";

/// Every prefix in use, for exhaustive ID tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_ESTABLISHMENT,
    PREFIX_INSPECTION,
    PREFIX_QUESTION,
    PREFIX_RESULT,
    PREFIX_RESPONSE,
    PREFIX_UTILITY,
];
