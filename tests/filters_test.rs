mod query_composition {
    use anandam::filters::{compose, Constraint, FilterCriteria, SEARCH_COLUMNS};

    fn full_criteria() -> FilterCriteria {
        FilterCriteria {
            search: "lake".to_string(),
            city: "Nainital".to_string(),
            property_type: "Villa".to_string(),
            min_price: "1000000".to_string(),
            max_price: "25000000".to_string(),
            bedrooms: "3".to_string(),
            status: "Available".to_string(),
        }
    }

    #[test]
    fn empty_criteria_compose_to_nothing() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(compose(&criteria).len(), 0);
    }

    #[test]
    fn compose_is_deterministic() {
        let criteria = full_criteria();
        assert_eq!(compose(&criteria), compose(&criteria));
    }

    #[test]
    fn field_order_is_fixed() {
        let constraints = compose(&full_criteria());
        assert_eq!(
            constraints,
            vec![
                Constraint::AnyContains {
                    columns: SEARCH_COLUMNS,
                    needle: "lake".to_string(),
                },
                Constraint::Equals {
                    column: "city",
                    value: "Nainital".to_string(),
                },
                Constraint::Equals {
                    column: "property_type",
                    value: "Villa".to_string(),
                },
                Constraint::AtLeast {
                    column: "price",
                    value: 1_000_000,
                },
                Constraint::AtMost {
                    column: "price",
                    value: 25_000_000,
                },
                Constraint::Equals {
                    column: "bedrooms",
                    value: "3".to_string(),
                },
                Constraint::Equals {
                    column: "status",
                    value: "Available".to_string(),
                },
            ]
        );
    }

    #[test]
    fn search_probes_title_locality_city() {
        assert_eq!(SEARCH_COLUMNS, &["title", "locality", "city"]);
    }

    #[test]
    fn bedrooms_five_plus_is_at_least_five() {
        let criteria = FilterCriteria {
            bedrooms: "5+".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            compose(&criteria),
            vec![Constraint::AtLeast {
                column: "bedrooms",
                value: 5,
            }]
        );
    }

    #[test]
    fn bedrooms_exact_is_equality() {
        let criteria = FilterCriteria {
            bedrooms: "3".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            compose(&criteria),
            vec![Constraint::Equals {
                column: "bedrooms",
                value: "3".to_string(),
            }]
        );
    }

    #[test]
    fn malformed_bounds_are_dropped() {
        let criteria = FilterCriteria {
            min_price: "ten lakh".to_string(),
            max_price: "2500000".to_string(),
            bedrooms: "many".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            compose(&criteria),
            vec![Constraint::AtMost {
                column: "price",
                value: 2_500_000,
            }]
        );
    }

    #[test]
    fn conflicting_bounds_pass_through_verbatim() {
        let criteria = FilterCriteria {
            min_price: "10000000".to_string(),
            max_price: "1000000".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            compose(&criteria),
            vec![
                Constraint::AtLeast {
                    column: "price",
                    value: 10_000_000,
                },
                Constraint::AtMost {
                    column: "price",
                    value: 1_000_000,
                },
            ]
        );
    }
}

mod local_matching {
    use anandam::filters::{compose, matches_all, FilterCriteria};
    use anandam::models::property::create_test_record;

    #[test]
    fn bedrooms_bucket_selects_five_and_up() {
        let records: Vec<_> = [2, 5, 6, 4]
            .iter()
            .map(|&bedrooms| {
                let mut record = create_test_record(&format!("unit-{}", bedrooms));
                record.bedrooms = bedrooms;
                record
            })
            .collect();

        let criteria = FilterCriteria {
            bedrooms: "5+".to_string(),
            ..FilterCriteria::default()
        };
        let constraints = compose(&criteria);

        let selected: Vec<i64> = records
            .iter()
            .filter(|record| matches_all(&constraints, record))
            .map(|record| record.bedrooms)
            .collect();
        assert_eq!(selected, vec![5, 6]);
    }

    #[test]
    fn search_is_case_insensitive_across_columns() {
        let mut by_title = create_test_record("by-title");
        by_title.title = "Lakeside Retreat".to_string();
        let mut by_locality = create_test_record("by-locality");
        by_locality.locality = "Lake Road".to_string();
        let mut by_city = create_test_record("by-city");
        by_city.city = "Naukuchiatal Lake".to_string();
        let mut no_match = create_test_record("no-match");
        no_match.title = "Pine Crest".to_string();
        no_match.locality = "Mallital".to_string();
        no_match.city = "Almora".to_string();

        let criteria = FilterCriteria {
            search: "LAKE".to_string(),
            ..FilterCriteria::default()
        };
        let constraints = compose(&criteria);

        assert!(matches_all(&constraints, &by_title));
        assert!(matches_all(&constraints, &by_locality));
        assert!(matches_all(&constraints, &by_city));
        assert!(!matches_all(&constraints, &no_match));
    }

    #[test]
    fn empty_criteria_match_everything() {
        let constraints = compose(&FilterCriteria::default());
        assert!(matches_all(&constraints, &create_test_record("any")));
    }

    #[test]
    fn conflicting_bounds_match_nothing_without_error() {
        let criteria = FilterCriteria {
            min_price: "10000000".to_string(),
            max_price: "1000000".to_string(),
            ..FilterCriteria::default()
        };
        let constraints = compose(&criteria);

        for price in [500_000, 5_000_000, 50_000_000] {
            let mut record = create_test_record(&format!("priced-{}", price));
            record.price = price;
            assert!(!matches_all(&constraints, &record));
        }
    }

    #[test]
    fn status_and_type_filters_compare_wire_spelling() {
        use anandam::models::property::{ListingStatus, PropertyType};

        let mut record = create_test_record("under-construction");
        record.status = ListingStatus::UnderConstruction;
        record.property_type = PropertyType::Farmhouse;

        let criteria = FilterCriteria {
            status: "Under Construction".to_string(),
            property_type: "Farmhouse".to_string(),
            ..FilterCriteria::default()
        };
        assert!(matches_all(&compose(&criteria), &record));

        let wrong_status = FilterCriteria {
            status: "Sold".to_string(),
            ..FilterCriteria::default()
        };
        assert!(!matches_all(&compose(&wrong_status), &record));
    }
}
