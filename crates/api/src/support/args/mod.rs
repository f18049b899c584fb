#![forbid(unsafe_code)]

mod bools;
mod lists;
mod numbers;
mod strings;

pub(crate) use bools::*;
pub(crate) use lists::*;
pub(crate) use numbers::*;
pub(crate) use strings::*;
