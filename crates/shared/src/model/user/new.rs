use serde::{Deserialize, Serialize};

use crate::types::Uuid;
#[cfg(feature = "backend")]
use exemplar::Model;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
}

impl NewUser {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self { id: Uuid::new_v4(), username: username.into() }
    }
}
