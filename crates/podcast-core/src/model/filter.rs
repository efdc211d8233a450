// ── Filter state ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Direction used by the rating-sorted view.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// User-controlled filter settings held by the store.
///
/// An empty `query` means no filtering is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub query: String,
    pub order: SortOrder,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_parses_case_insensitively() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn sort_order_displays_lowercase() {
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn default_filter_requests_nothing() {
        let f = Filter::default();
        assert!(f.query.is_empty());
        assert_eq!(f.order, SortOrder::Asc);
    }
}
