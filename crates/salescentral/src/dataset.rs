//! The source datasets handled by the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SalesCentralError;
use crate::schema::TargetSchema;

/// One of the six source datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Users,
    Cards,
    Stores,
    Products,
    Orders,
    DateTimes,
}

impl Dataset {
    /// All datasets, in load order.
    pub fn all() -> &'static [Dataset] {
        &[
            Dataset::Users,
            Dataset::Cards,
            Dataset::Stores,
            Dataset::Products,
            Dataset::Orders,
            Dataset::DateTimes,
        ]
    }

    /// Short snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Users => "users",
            Dataset::Cards => "cards",
            Dataset::Stores => "stores",
            Dataset::Products => "products",
            Dataset::Orders => "orders",
            Dataset::DateTimes => "date_times",
        }
    }

    /// Where the raw table comes from unless configured otherwise.
    ///
    /// Plain names are tables in the export directory, `api` is the store
    /// API, and anything with a scheme is a remote file.
    pub fn default_source(&self) -> &'static str {
        match self {
            Dataset::Users => "legacy_users",
            Dataset::Cards => {
                "https://data-handling-public.s3.eu-west-1.amazonaws.com/card_details.pdf"
            }
            Dataset::Stores => "api",
            Dataset::Products => "s3://data-handling-public/products.csv",
            Dataset::Orders => "orders_table",
            Dataset::DateTimes => {
                "https://data-handling-public.s3.eu-west-1.amazonaws.com/date_details.json"
            }
        }
    }

    /// Warehouse table this dataset is loaded into.
    pub fn target_schema(&self) -> TargetSchema {
        TargetSchema::for_dataset(*self)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = SalesCentralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Dataset::all()
            .iter()
            .copied()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = Dataset::all().iter().map(Dataset::name).collect();
                SalesCentralError::Config(format!(
                    "Unknown dataset '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("users".parse::<Dataset>().unwrap(), Dataset::Users);
        assert_eq!("date-times".parse::<Dataset>().unwrap(), Dataset::DateTimes);
        assert_eq!("Products".parse::<Dataset>().unwrap(), Dataset::Products);
        assert!("customers".parse::<Dataset>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for dataset in Dataset::all() {
            assert_eq!(dataset.to_string().parse::<Dataset>().unwrap(), *dataset);
        }
    }
}
