mod hook_error;

pub use hook_error::{HookError, HookErrorKind};
