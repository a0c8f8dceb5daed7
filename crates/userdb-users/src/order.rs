//! Sort order for paged reads

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use userdb_storage::Direction;

use crate::error::UserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub(crate) fn direction(self) -> Direction {
        match self {
            SortOrder::Asc => Direction::Next,
            SortOrder::Desc => Direction::Prev,
        }
    }
}

impl FromStr for SortOrder {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(UserError::InvalidOrder(s.to_string())),
        }
    }
}
