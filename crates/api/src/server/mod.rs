#![forbid(unsafe_code)]

mod definitions;
mod lifecycle;

pub(crate) use definitions::tool_definitions;
