//! Accident intake domain
//!
//! Covers the lifecycle of one accident case: the canonical status registry,
//! normalization of loosely-shaped legacy input into the canonical record, and
//! best-effort parsing of pasted messenger intake blobs.

pub mod status;
pub mod record;
pub mod normalize;
pub mod intake;
pub mod error;

pub use status::{AccidentStatus, StatusStyle};
pub use record::AccidentRecord;
pub use normalize::canonicalize;
pub use intake::{parse_message, IntakeDraft};
pub use error::AccidentError;
