//! Route handlers organized by resource

use serde::Serialize;

pub mod favorites;
pub mod health;
pub mod people;
pub mod planets;
pub mod users;

/// `{"msg": ...}` acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub msg: String,
}

impl MessageBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// `{"result": ...}` wrapper for single-entity reads
#[derive(Debug, Serialize)]
pub struct ResultBody<T> {
    pub result: T,
}
