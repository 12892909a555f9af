//! Tests for filter module

#[cfg(test)]
mod tests {
    use crate::filter::*;
    use serde_json::json;

    // =========================================================================
    // Wire shape
    // =========================================================================

    #[test]
    fn test_filter_set_serializes_camel_case() {
        let set = FilterSet::new(2, 10)
            .sorted_by("lastName", SortDirection::Desc)
            .with_filter(
                FilterGroup::or()
                    .with_filter(Filter::like("firstName", "an"))
                    .with_group(FilterGroup::and().with_filter(Filter::eq("status", "Active"))),
            );

        let encoded = serde_json::to_value(&set).unwrap();
        assert_eq!(
            encoded,
            json!({
                "pageNumber": 2,
                "pageSize": 10,
                "sortBy": "lastName",
                "sortDir": "Desc",
                "filter": {
                    "operator": "Or",
                    "filters": [
                        {"field": "firstName", "value": "an", "action": "Like"}
                    ],
                    "filterGroups": [
                        {
                            "operator": "And",
                            "filters": [
                                {"field": "status", "value": "Active", "action": "Eq"}
                            ],
                            "filterGroups": []
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_sort_by_is_omitted_when_unset() {
        let encoded = serde_json::to_value(FilterSet::new(1, 25)).unwrap();
        assert!(encoded.get("sortBy").is_none());
        assert_eq!(encoded["sortDir"], "Asc");
    }

    #[test]
    fn test_deserializes_with_missing_members() {
        let set: FilterSet = serde_json::from_value(json!({
            "pageNumber": 1,
            "pageSize": 25,
            "filter": {"operator": "And"}
        }))
        .unwrap();

        assert_eq!(set.sort_by, None);
        assert_eq!(set.sort_dir, SortDirection::Asc);
        assert!(set.filter.filters.is_empty());
        assert!(set.filter.filter_groups.is_empty());
    }

    #[test]
    fn test_comparator_round_trips_all_wire_names() {
        for (comparator, name) in [
            (Comparator::Eq, "Eq"),
            (Comparator::Gt, "Gt"),
            (Comparator::Lt, "Lt"),
            (Comparator::GtEq, "GtEq"),
            (Comparator::LtEq, "LtEq"),
            (Comparator::NEq, "NEq"),
            (Comparator::Like, "Like"),
            (Comparator::ILike, "ILike"),
            (Comparator::In, "In"),
        ] {
            let encoded = serde_json::to_value(comparator).unwrap();
            assert_eq!(encoded, json!(name));
            let decoded: Comparator = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, comparator);
        }
    }

    // =========================================================================
    // Root inspection and required filters
    // =========================================================================

    #[test]
    fn test_has_filters_checks_only_the_root() {
        let empty = FilterSet::new(1, 10);
        assert!(!empty.has_filters());

        let with_leaf =
            FilterSet::new(1, 10).with_filter(FilterGroup::and().with_filter(Filter::eq("a", "1")));
        assert!(with_leaf.has_filters());

        // a nested group counts even when it is itself empty
        let with_group =
            FilterSet::new(1, 10).with_filter(FilterGroup::and().with_group(FilterGroup::or()));
        assert!(with_group.has_filters());
    }

    #[test]
    fn test_required_filter_joins_and_root_directly() {
        let mut set =
            FilterSet::new(1, 10).with_filter(FilterGroup::and().with_filter(Filter::eq("a", "1")));
        set.add_required_filter("tenant", "acme");

        assert_eq!(set.filter.operator, FilterOperator::And);
        assert_eq!(set.filter.filters.len(), 2);
        assert_eq!(set.filter.filters[1], Filter::eq("tenant", "acme"));
    }

    #[test]
    fn test_required_filter_demotes_or_root() {
        let mut set = FilterSet::new(1, 10).with_filter(
            FilterGroup::or()
                .with_filter(Filter::like("firstName", "an"))
                .with_filter(Filter::like("lastName", "an")),
        );
        set.add_required_filter("tenant", "acme");

        // new AND root: required leaf plus the old OR tree as a subgroup
        assert_eq!(set.filter.operator, FilterOperator::And);
        assert_eq!(set.filter.filters, vec![Filter::eq("tenant", "acme")]);
        assert_eq!(set.filter.filter_groups.len(), 1);
        assert_eq!(set.filter.filter_groups[0].operator, FilterOperator::Or);
        assert_eq!(set.filter.filter_groups[0].filters.len(), 2);
    }

    #[test]
    fn test_required_group_demotes_or_root_keeping_order() {
        let mut set =
            FilterSet::new(1, 10).with_filter(FilterGroup::or().with_filter(Filter::eq("a", "1")));
        let required = FilterGroup::and().with_filter(Filter::eq("tenant", "acme"));
        set.add_required_group(required.clone());

        assert_eq!(set.filter.operator, FilterOperator::And);
        assert_eq!(set.filter.filter_groups.len(), 2);
        assert_eq!(set.filter.filter_groups[0].operator, FilterOperator::Or);
        assert_eq!(set.filter.filter_groups[1], required);
    }

    #[test]
    fn test_required_group_appends_to_and_root() {
        let mut set = FilterSet::new(1, 10);
        set.add_required_group(FilterGroup::and().with_filter(Filter::eq("tenant", "acme")));
        assert_eq!(set.filter.operator, FilterOperator::And);
        assert_eq!(set.filter.filter_groups.len(), 1);
        assert!(set.has_filters());
    }
}
