pub mod flatten;
pub mod headers;
pub mod template;
