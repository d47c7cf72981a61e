//! Shipment query engine: status filter, search, sort, paginate.
//!
//! The stages run in a fixed order and `total_count` is taken after sorting
//! but before pagination, so it only reflects the status and search filters.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Shipment, ShipmentStatus, ALL_SHIPMENTS};

/// Options for a shipment listing. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentQuery {
    /// Derived status label, or `All Shipments` for no filter.
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive substring.
    #[serde(default)]
    pub search: Option<String>,
    /// `<field>_<direction>`, e.g. `attendance_ASC`.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Records to skip after filtering and sorting.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Maximum records returned after the offset.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One page of a shipment listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPage {
    /// Records matching the status and search filters, ignoring pagination.
    pub total_count: usize,
    pub shipments: Vec<Shipment>,
}

/// Parsed form of the `status` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status filter.
    Any,
    /// Keep only records with this derived status.
    Only(ShipmentStatus),
    /// A label naming no status; matches nothing.
    Unmatched,
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL_SHIPMENTS) => StatusFilter::Any,
            Some(label) => label
                .parse()
                .map(StatusFilter::Only)
                .unwrap_or(StatusFilter::Unmatched),
        }
    }

    fn matches(&self, shipment: &Shipment) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Only(status) => shipment.status() == *status,
            StatusFilter::Unmatched => false,
        }
    }
}

/// Fields a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Age,
    Class,
    Attendance,
    Origin,
    Destination,
    Priority,
}

impl SortField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "age" => Some(SortField::Age),
            "class" => Some(SortField::Class),
            "attendance" => Some(SortField::Attendance),
            "origin" => Some(SortField::Origin),
            "destination" => Some(SortField::Destination),
            "priority" => Some(SortField::Priority),
            _ => None,
        }
    }

    /// Ascending comparison on this field.
    ///
    /// Strings compare lexically, so id "10" sorts before "2". Absent
    /// optional fields sort before present ones.
    fn compare(&self, a: &Shipment, b: &Shipment) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Age => a.age.cmp(&b.age),
            SortField::Class => a.class.cmp(&b.class),
            SortField::Attendance => compare_progress(a.attendance, b.attendance),
            SortField::Origin => a.origin.cmp(&b.origin),
            SortField::Destination => a.destination.cmp(&b.destination),
            SortField::Priority => a.priority.cmp(&b.priority),
        }
    }
}

/// Numeric order where 0.0 and -0.0 tie; NaN falls back to the total order.
fn compare_progress(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Parsed form of the `sortBy` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// `None` when the field name is not sortable; the order is then kept.
    pub field: Option<SortField>,
    pub ascending: bool,
}

impl SortSpec {
    /// Split on the last underscore. Only an exact `ASC` direction sorts
    /// ascending; a missing or unknown direction sorts descending.
    pub fn parse(raw: &str) -> Self {
        let (field, direction) = match raw.rsplit_once('_') {
            Some((field, direction)) => (field, Some(direction)),
            None => (raw, None),
        };

        let field_kind = SortField::from_name(field);
        if field_kind.is_none() {
            tracing::debug!(field = %field, "Ignoring unknown sort field");
        }

        Self {
            field: field_kind,
            ascending: direction == Some("ASC"),
        }
    }

    /// Stable sort; ties keep their input order in both directions.
    fn apply(&self, shipments: &mut [&Shipment]) {
        let Some(field) = self.field else {
            return;
        };

        shipments.sort_by(|a, b| {
            let ordering = field.compare(a, b);
            if self.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }
}

/// Run a listing query over the collection.
pub fn run_query(shipments: &[Shipment], query: &ShipmentQuery) -> ShipmentPage {
    let status = StatusFilter::parse(query.status.as_deref());
    let needle = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<&Shipment> = shipments
        .iter()
        .filter(|s| status.matches(s))
        .filter(|s| needle.as_deref().map_or(true, |n| s.matches_search(n)))
        .collect();

    if let Some(sort_by) = query.sort_by.as_deref() {
        SortSpec::parse(sort_by).apply(&mut matched);
    }

    let total_count = matched.len();

    let offset = query.offset.unwrap_or(0).min(total_count);
    let limit = query.limit.unwrap_or(usize::MAX);
    let page = matched[offset..]
        .iter()
        .take(limit)
        .map(|s| (*s).clone())
        .collect();

    ShipmentPage {
        total_count,
        shipments: page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_shipments;

    fn query() -> ShipmentQuery {
        ShipmentQuery::default()
    }

    fn ids(page: &ShipmentPage) -> Vec<&str> {
        page.shipments.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let seed = seed_shipments();
        let page = run_query(&seed, &query());

        assert_eq!(page.total_count, 20);
        assert_eq!(page.shipments, seed);
    }

    #[test]
    fn test_pending_filter_on_seed() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                status: Some("Pending".to_string()),
                ..query()
            },
        );

        assert_eq!(page.total_count, 1);
        assert_eq!(page.shipments[0].name, "Tata Motors");
    }

    #[test]
    fn test_status_filter_respects_derived_status() {
        let seed = seed_shipments();
        for status in [
            ShipmentStatus::Pending,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
        ] {
            let page = run_query(
                &seed,
                &ShipmentQuery {
                    status: Some(status.label().to_string()),
                    ..query()
                },
            );
            assert!(page.shipments.iter().all(|s| s.status() == status));
        }
    }

    #[test]
    fn test_status_counts_partition_seed() {
        let seed = seed_shipments();
        let count = |label: &str| {
            run_query(
                &seed,
                &ShipmentQuery {
                    status: Some(label.to_string()),
                    ..query()
                },
            )
            .total_count
        };

        assert_eq!(count("Pending"), 1);
        assert_eq!(count("In Transit"), 14);
        assert_eq!(count("Delivered"), 5);
        assert_eq!(count(ALL_SHIPMENTS), 20);
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                status: Some("pending".to_string()),
                ..query()
            },
        );
        assert_eq!(page.total_count, 0);
        assert!(page.shipments.is_empty());
    }

    #[test]
    fn test_empty_status_is_no_filter() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                status: Some(String::new()),
                ..query()
            },
        );
        assert_eq!(page.total_count, 20);
    }

    #[test]
    fn test_search_express_includes_every_express_class() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                search: Some("express".to_string()),
                ..query()
            },
        );

        let expected: Vec<&str> = seed
            .iter()
            .filter(|s| s.class.eq_ignore_ascii_case("express"))
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(expected.len(), 7);
        for id in expected {
            assert!(ids(&page).contains(&id), "missing express shipment {id}");
        }
    }

    #[test]
    fn test_search_results_contain_needle() {
        let seed = seed_shipments();
        for needle in ["PARTS", "1", "st", "cash", "hdfc"] {
            let page = run_query(
                &seed,
                &ShipmentQuery {
                    search: Some(needle.to_string()),
                    ..query()
                },
            );
            let lower = needle.to_lowercase();
            assert!(!page.shipments.is_empty(), "no hits for {needle}");
            assert!(page.shipments.iter().all(|s| s.matches_search(&lower)));
        }
    }

    #[test]
    fn test_search_matches_cargo_items() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                search: Some("Insulin".to_string()),
                ..query()
            },
        );
        assert_eq!(ids(&page), vec!["20"]);
    }

    #[test]
    fn test_empty_search_is_no_filter() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                search: Some(String::new()),
                ..query()
            },
        );
        assert_eq!(page.total_count, 20);
    }

    #[test]
    fn test_status_and_search_combine() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                status: Some("Delivered".to_string()),
                search: Some("express".to_string()),
                ..query()
            },
        );
        assert_eq!(ids(&page), vec!["6"]);
    }

    #[test]
    fn test_sort_attendance_ascending() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                sort_by: Some("attendance_ASC".to_string()),
                ..query()
            },
        );

        let values: Vec<f64> = page.shipments.iter().map(|s| s.attendance).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(page.shipments[0].name, "Tata Motors");
        // Ties keep collection order.
        let delivered: Vec<&str> = page
            .shipments
            .iter()
            .filter(|s| s.attendance == 100.0)
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(delivered, vec!["3", "6", "11", "16", "18"]);
    }

    #[test]
    fn test_sort_directions_reverse_modulo_ties() {
        let seed = seed_shipments();
        let run = |sort: &str| {
            run_query(
                &seed,
                &ShipmentQuery {
                    sort_by: Some(sort.to_string()),
                    ..query()
                },
            )
        };

        let asc = run("attendance_ASC");
        let desc = run("attendance_DESC");

        let asc_values: Vec<f64> = asc.shipments.iter().map(|s| s.attendance).collect();
        let mut desc_values: Vec<f64> = desc.shipments.iter().map(|s| s.attendance).collect();
        desc_values.reverse();
        assert_eq!(asc_values, desc_values);

        // Within a tie group both directions keep input order.
        let ties = |page: &ShipmentPage| -> Vec<String> {
            page.shipments
                .iter()
                .filter(|s| s.attendance == 100.0)
                .map(|s| s.id.clone())
                .collect()
        };
        assert_eq!(ties(&asc), ties(&desc));
    }

    #[test]
    fn test_sort_strings_lexically() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                sort_by: Some("id_ASC".to_string()),
                ..query()
            },
        );
        assert_eq!(&ids(&page)[..4], &["1", "10", "11", "12"]);

        let page = run_query(
            &seed,
            &ShipmentQuery {
                sort_by: Some("name_DESC".to_string()),
                ..query()
            },
        );
        assert_eq!(page.shipments[0].name, "Zomato Hyperpure");
    }

    #[test]
    fn test_sort_age_numerically() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                sort_by: Some("age_DESC".to_string()),
                ..query()
            },
        );
        assert_eq!(page.shipments[0].age, 15);
        assert_eq!(page.shipments[19].age, 0);
    }

    #[test]
    fn test_sort_spec_parsing() {
        assert_eq!(
            SortSpec::parse("attendance_ASC"),
            SortSpec {
                field: Some(SortField::Attendance),
                ascending: true
            }
        );
        assert!(!SortSpec::parse("attendance_DESC").ascending);
        assert!(!SortSpec::parse("attendance_asc").ascending);

        let bare = SortSpec::parse("age");
        assert_eq!(bare.field, Some(SortField::Age));
        assert!(!bare.ascending);

        let unknown = SortSpec::parse("weight_ASC");
        assert_eq!(unknown.field, None);
    }

    #[test]
    fn test_sort_without_underscore_is_descending() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                sort_by: Some("age".to_string()),
                ..query()
            },
        );
        assert_eq!(page.shipments[0].age, 15);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                sort_by: Some("weight_ASC".to_string()),
                ..query()
            },
        );
        assert_eq!(page.shipments, seed);
    }

    #[test]
    fn test_pagination_window() {
        let seed = seed_shipments();
        let page = run_query(
            &seed,
            &ShipmentQuery {
                offset: Some(5),
                limit: Some(3),
                ..query()
            },
        );

        assert_eq!(page.total_count, 20);
        assert_eq!(ids(&page), vec!["6", "7", "8"]);
    }

    #[test]
    fn test_total_count_ignores_pagination() {
        let seed = seed_shipments();
        let base = ShipmentQuery {
            status: Some("In Transit".to_string()),
            ..query()
        };
        let unpaged = run_query(&seed, &base).total_count;

        for (offset, limit) in [(Some(0), Some(1)), (Some(3), None), (None, Some(0)), (Some(50), Some(5))] {
            let page = run_query(
                &seed,
                &ShipmentQuery {
                    offset,
                    limit,
                    ..base.clone()
                },
            );
            assert_eq!(page.total_count, unpaged);
            assert!(page.total_count >= page.shipments.len());
        }
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let seed = seed_shipments();
        for offset in [20, 21, 1000] {
            let page = run_query(
                &seed,
                &ShipmentQuery {
                    offset: Some(offset),
                    ..query()
                },
            );
            assert_eq!(page.total_count, 20);
            assert!(page.shipments.is_empty());
        }
    }

    #[test]
    fn test_empty_collection() {
        let page = run_query(
            &[],
            &ShipmentQuery {
                search: Some("anything".to_string()),
                sort_by: Some("name_ASC".to_string()),
                offset: Some(2),
                limit: Some(2),
                ..query()
            },
        );
        assert_eq!(page.total_count, 0);
        assert!(page.shipments.is_empty());
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = ShipmentPage {
            total_count: 0,
            shipments: vec![],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 0);
    }
}
