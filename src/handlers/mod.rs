//! Request handlers module

pub mod corporation;
pub mod department;
pub mod employee;
pub mod org;
pub mod role;
pub mod selector;

use serde::Deserialize;

/// Query parameters carrying a single id
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}
