//! Appointment validation and partitioning.
//!
//! Two companion engines with deliberately different error policies:
//! the validator fails fast with typed errors so the user gets precise
//! feedback before anything is persisted; the partitioner is a pure
//! reordering over already-stored records and cannot fail.

mod partition;
mod validator;

pub use partition::*;
pub use validator::*;
