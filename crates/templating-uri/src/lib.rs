#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod params;
mod template;

pub use crate::error::{Error, Result};
pub use crate::params::{Params, Value};
pub use crate::template::{Expression, Operator, UriTemplate};
