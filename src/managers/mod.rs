pub mod commands;
pub mod webhook;
