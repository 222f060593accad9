//! Group management for groupdrive.
//!
//! Groups are identified by a short code. The first member of a group is its
//! admin; membership is kept in step with a per-user index so a user's groups
//! can be listed in join order.

mod code;
mod registry;

pub use code::{is_valid_code, CodeGenerator, RandomCodeGenerator, CODE_LENGTH};
pub use registry::{Departure, Group, GroupRegistry, DEFAULT_MAX_CODE_ATTEMPTS};
