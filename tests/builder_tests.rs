//! Schema builder tests

use nested_schema::builder::{BuilderConfig, ConflictPolicy, SchemaBuilder};
use nested_schema::error::SchemaError;
use nested_schema::models::{ForeignKey, TableDefinition};
use nested_schema::registry::TableRegistry;
use nested_schema::types::ColumnType;

fn people_with_items() -> TableDefinition {
    TableDefinition::new("people")
        .with_column("firstName", "String")
        .with_column("lastName", "String")
        .with_child(
            "inventory",
            TableDefinition::new("items").with_column("description", "String"),
        )
}

mod construction_tests {
    use super::*;

    #[test]
    fn test_people_items_scenario() {
        let registry = SchemaBuilder::new().build_all(&[people_with_items()]).unwrap();

        assert_eq!(registry.names(), vec!["people", "items"]);

        let people = registry.get("people").unwrap();
        assert_eq!(people.column_names(), vec!["id", "firstName", "lastName"]);
        assert!(people.primary_key().primary_key);

        let items = registry.get("items").unwrap();
        assert_eq!(items.column_names(), vec!["id", "description", "people_id"]);
        let fk = items.column("people_id").unwrap();
        assert_eq!(fk.foreign_key, Some(ForeignKey::new("people", "id")));
        assert_eq!(fk.column_type, ColumnType::Integer);
    }

    #[test]
    fn test_default_primary_key() {
        let def = TableDefinition::new("notes").with_column("body", "Text");
        let registry = SchemaBuilder::new().build_all(&[def]).unwrap();
        let key = registry.get("notes").unwrap().primary_key().clone();

        assert_eq!(key.name, "id");
        assert_eq!(key.column_type, ColumnType::Integer);
        assert!(key.primary_key);
        assert!(key.autoincrement);
    }

    #[test]
    fn test_primary_key_first_regardless_of_declaration_position() {
        let def = TableDefinition::new("people")
            .with_column("firstName", "String")
            .with_column("lastName", "String")
            .with_column("person_id", "Integer")
            .with_primary_key("person_id");
        let registry = SchemaBuilder::new().build_all(&[def]).unwrap();
        let people = registry.get("people").unwrap();

        assert_eq!(
            people.column_names(),
            vec!["person_id", "firstName", "lastName"]
        );
        assert_eq!(people.primary_key().name, "person_id");
        assert_eq!(
            people.columns().iter().filter(|c| c.primary_key).count(),
            1
        );
    }

    #[test]
    fn test_foreign_key_targets_explicit_primary_key() {
        let def = TableDefinition::new("people")
            .with_column("person_id", "Integer")
            .with_primary_key("person_id")
            .with_child("inventory", TableDefinition::new("items"));
        let registry = SchemaBuilder::new().build_all(&[def]).unwrap();
        let items = registry.get("items").unwrap();

        assert_eq!(
            items.column("people_person_id").unwrap().foreign_key,
            Some(ForeignKey::new("people", "person_id"))
        );
    }

    #[test]
    fn test_forest_preserves_construction_order() {
        let roots = vec![
            TableDefinition::new("orders")
                .with_child("lines", TableDefinition::new("order_lines")),
            TableDefinition::new("customers"),
        ];
        let registry = SchemaBuilder::new().build_all(&roots).unwrap();
        assert_eq!(registry.names(), vec!["orders", "order_lines", "customers"]);
    }
}

mod cycle_tests {
    use super::*;

    #[test]
    fn test_self_cycle() {
        let def = TableDefinition::new("people")
            .with_column("name", "String")
            .with_child("friends", TableDefinition::reference("people"));
        let registry = SchemaBuilder::new().build_all(&[def]).unwrap();

        assert_eq!(registry.len(), 1);
        let people = registry.get("people").unwrap();
        assert_eq!(people.column_names(), vec!["id", "name", "people_id"]);
        assert_eq!(
            people.column("people_id").unwrap().foreign_key,
            Some(ForeignKey::new("people", "id"))
        );
    }

    #[test]
    fn test_self_cycle_with_full_repeat_of_definition() {
        let inner = TableDefinition::new("nodes").with_column("label", "String");
        let def = TableDefinition::new("nodes")
            .with_column("label", "String")
            .with_child("children", inner);
        let registry = SchemaBuilder::with_config(
            BuilderConfig::builder()
                .on_conflict(ConflictPolicy::KeepExisting)
                .build(),
        )
        .build_all(&[def])
        .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("nodes").unwrap().column_names(),
            vec!["id", "label", "nodes_id"]
        );
    }

    #[test]
    fn test_mutual_cycle() {
        let def = TableDefinition::new("a").with_column("x", "String").with_child(
            "bs",
            TableDefinition::new("b")
                .with_column("y", "String")
                .with_child("as", TableDefinition::reference("a")),
        );
        let registry = SchemaBuilder::new().build_all(&[def]).unwrap();

        assert_eq!(registry.names(), vec!["a", "b"]);

        let a = registry.get("a").unwrap();
        let b = registry.get("b").unwrap();
        assert_eq!(a.column_names(), vec!["id", "x", "b_id"]);
        assert_eq!(b.column_names(), vec!["id", "y", "a_id"]);
        assert_eq!(a.foreign_keys().count(), 1);
        assert_eq!(b.foreign_keys().count(), 1);
        assert_eq!(
            b.column("a_id").unwrap().foreign_key,
            Some(ForeignKey::new("a", "id"))
        );
    }

    #[test]
    fn test_shared_child_across_parents() {
        let roots = vec![
            TableDefinition::new("people")
                .with_child("tags", TableDefinition::new("tags").with_column("label", "String")),
            TableDefinition::new("projects").with_child("tags", TableDefinition::reference("tags")),
        ];
        let registry = SchemaBuilder::new().build_all(&roots).unwrap();

        assert_eq!(
            registry.get("tags").unwrap().column_names(),
            vec!["id", "label", "people_id", "projects_id"]
        );
    }
}

mod forward_reference_tests {
    use super::*;

    fn forward_reference_forest() -> Vec<TableDefinition> {
        vec![
            TableDefinition::new("people")
                .with_child("inventory", TableDefinition::reference("items")),
            TableDefinition::new("items").with_column("description", "String"),
        ]
    }

    #[test]
    fn test_later_definition_completes_reference() {
        let registry = SchemaBuilder::new()
            .build_all(&forward_reference_forest())
            .unwrap();

        assert_eq!(registry.names(), vec!["people", "items"]);
        assert!(registry.pending().is_empty());
        let items = registry.get("items").unwrap();
        assert_eq!(items.column_names(), vec!["id", "description", "people_id"]);
        assert_eq!(
            items.column("people_id").unwrap().foreign_key,
            Some(ForeignKey::new("people", "id"))
        );
    }

    #[test]
    fn test_later_definition_is_not_a_conflict_under_reject_policy() {
        let builder = SchemaBuilder::with_config(
            BuilderConfig::builder()
                .on_conflict(ConflictPolicy::Reject)
                .build(),
        );
        let registry = builder.build_all(&forward_reference_forest()).unwrap();
        assert_eq!(
            registry.get("items").unwrap().column_names(),
            vec!["id", "description", "people_id"]
        );
    }

    #[test]
    fn test_completion_uses_explicit_primary_key() {
        let roots = vec![
            TableDefinition::new("orders")
                .with_child("buyer", TableDefinition::reference("customers")),
            TableDefinition::new("customers")
                .with_column("email", "String")
                .with_column("code", "String")
                .with_primary_key("code"),
        ];
        let registry = SchemaBuilder::new().build_all(&roots).unwrap();
        let customers = registry.get("customers").unwrap();

        assert_eq!(customers.column_names(), vec!["code", "email", "orders_id"]);
        assert_eq!(customers.primary_key().column_type, ColumnType::String);
        assert!(!customers.primary_key().autoincrement);
    }

    #[test]
    fn test_completion_across_build_calls() {
        let builder = SchemaBuilder::new();
        let mut registry = TableRegistry::new();
        let [people, items] = <[TableDefinition; 2]>::try_from(forward_reference_forest()).unwrap();

        builder.build(&people, &mut registry).unwrap();
        assert_eq!(registry.pending(), vec!["items"]);

        builder.build(&items, &mut registry).unwrap();
        assert!(registry.pending().is_empty());
        assert_eq!(
            registry.get("items").unwrap().column_names(),
            vec!["id", "description", "people_id"]
        );
    }

    #[test]
    fn test_completed_table_conflicts_like_any_other() {
        let mut roots = forward_reference_forest();
        roots.push(TableDefinition::new("items").with_column("weight", "Integer"));
        let builder = SchemaBuilder::with_config(
            BuilderConfig::builder()
                .on_conflict(ConflictPolicy::Reject)
                .build(),
        );
        let err = builder.build_all(&roots).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ConflictingDefinition {
                name: "items".to_string()
            }
        );
    }

    #[test]
    fn test_undefined_reference_stays_pending() {
        let def = TableDefinition::new("people")
            .with_child("tags", TableDefinition::reference("tags"));
        let registry = SchemaBuilder::new().build_all(&[def]).unwrap();

        assert_eq!(registry.pending(), vec!["tags"]);
        assert_eq!(
            registry.get("tags").unwrap().column_names(),
            vec!["id", "people_id"]
        );
    }

    #[test]
    fn test_loaded_registry_keeps_building() {
        let builder = SchemaBuilder::new();
        let mut registry = TableRegistry::new();
        let [people, items] = <[TableDefinition; 2]>::try_from(forward_reference_forest()).unwrap();
        builder.build(&people, &mut registry).unwrap();

        let json = serde_json::to_string(&registry).unwrap();
        let mut loaded: TableRegistry = serde_json::from_str(&json).unwrap();
        builder.build(&items, &mut loaded).unwrap();

        assert_eq!(
            loaded.get("items").unwrap().column_names(),
            vec!["id", "description", "people_id"]
        );
    }
}

mod idempotence_tests {
    use super::*;

    #[test]
    fn test_building_same_root_twice() {
        let builder = SchemaBuilder::new();
        let root = people_with_items();
        let mut registry = TableRegistry::new();

        builder.build(&root, &mut registry).unwrap();
        let first = registry.clone();
        builder.build(&root, &mut registry).unwrap();

        assert_eq!(registry, first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_building_same_root_twice_under_reject_policy() {
        let builder = SchemaBuilder::with_config(
            BuilderConfig::builder()
                .on_conflict(ConflictPolicy::Reject)
                .build(),
        );
        let root = people_with_items();
        let mut registry = TableRegistry::new();

        builder.build(&root, &mut registry).unwrap();
        builder.build(&root, &mut registry).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_forest_with_repeated_root() {
        let registry = SchemaBuilder::new()
            .build_all(&[people_with_items(), people_with_items()])
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("items").unwrap().foreign_keys().count(),
            1
        );
    }

    #[test]
    fn test_reference_resolves_against_earlier_build() {
        let builder = SchemaBuilder::new();
        let mut registry = TableRegistry::new();
        builder
            .build(
                &TableDefinition::new("people").with_column("name", "String"),
                &mut registry,
            )
            .unwrap();

        let items = TableDefinition::new("items")
            .with_column("description", "String")
            .with_child("owners", TableDefinition::reference("people"));
        builder.build(&items, &mut registry).unwrap();

        assert_eq!(
            registry.get("people").unwrap().column_names(),
            vec!["id", "name", "items_id"]
        );
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_unknown_type_fails_build() {
        let def = TableDefinition::new("people")
            .with_column("name", "String")
            .with_column("nickname", "Bogus");
        let err = SchemaBuilder::new().build_all(&[def]).unwrap_err();

        assert_eq!(
            err,
            SchemaError::UnknownType {
                type_name: "Bogus".to_string(),
                column_name: "nickname".to_string(),
            }
        );
        assert!(err.to_string().contains("Bogus"));
        assert!(err.to_string().contains("nickname"));
    }

    #[test]
    fn test_unknown_type_leaves_registry_untouched() {
        let builder = SchemaBuilder::new();
        let mut registry = TableRegistry::new();
        builder
            .build(&TableDefinition::new("existing"), &mut registry)
            .unwrap();
        let before = registry.clone();

        let def = TableDefinition::new("people").with_child(
            "inventory",
            TableDefinition::new("items")
                .with_column("description", "String")
                .with_child("owner", TableDefinition::reference("existing"))
                .with_column("weight", "Bogus"),
        );
        let err = builder.build(&def, &mut registry).unwrap_err();

        assert!(matches!(err, SchemaError::UnknownType { .. }));
        assert_eq!(registry, before);
        assert!(!registry.contains("people"));
        assert!(!registry.contains("items"));
        assert_eq!(registry.get("existing").unwrap().columns().len(), 1);
    }

    #[test]
    fn test_unknown_type_in_nested_child() {
        let def = TableDefinition::new("people").with_child(
            "inventory",
            TableDefinition::new("items").with_column("weight", "Bogus"),
        );
        let err = SchemaBuilder::new().build_all(&[def]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                type_name: "Bogus".to_string(),
                column_name: "weight".to_string(),
            }
        );
    }

    #[test]
    fn test_conflicting_definition_rejected() {
        let roots = vec![
            TableDefinition::new("people").with_column("name", "String"),
            TableDefinition::new("orders").with_child(
                "buyer",
                TableDefinition::new("people").with_column("email", "String"),
            ),
        ];
        let builder = SchemaBuilder::with_config(
            BuilderConfig::builder()
                .on_conflict(ConflictPolicy::Reject)
                .build(),
        );
        let err = builder.build_all(&roots).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ConflictingDefinition {
                name: "people".to_string()
            }
        );
    }

    #[test]
    fn test_conflicting_definition_across_builds_rejected() {
        let builder = SchemaBuilder::with_config(
            BuilderConfig::builder()
                .on_conflict(ConflictPolicy::Reject)
                .build(),
        );
        let mut registry = TableRegistry::new();
        builder
            .build(
                &TableDefinition::new("people").with_column("name", "String"),
                &mut registry,
            )
            .unwrap();

        let err = builder
            .build(
                &TableDefinition::new("people").with_column("name", "Integer"),
                &mut registry,
            )
            .unwrap_err();
        assert!(matches!(err, SchemaError::ConflictingDefinition { .. }));
    }

    #[test]
    fn test_conflicting_definition_kept_by_default() {
        let roots = vec![
            TableDefinition::new("people").with_column("name", "String"),
            TableDefinition::new("people").with_column("email", "String"),
        ];
        let registry = SchemaBuilder::new().build_all(&roots).unwrap();
        assert_eq!(
            registry.get("people").unwrap().column_names(),
            vec!["id", "name"]
        );
    }

    #[test]
    fn test_max_depth_guard() {
        let chain = TableDefinition::new("t0").with_child(
            "c",
            TableDefinition::new("t1")
                .with_child("c", TableDefinition::new("t2").with_child("c", TableDefinition::new("t3"))),
        );
        let builder =
            SchemaBuilder::with_config(BuilderConfig::builder().max_depth(2).build());
        let err = builder.build_all(&[chain]).unwrap_err();

        assert_eq!(
            err,
            SchemaError::MaxDepthExceeded {
                table: "t3".to_string(),
                depth: 3,
                max: 2,
            }
        );
    }

    #[test]
    fn test_cycles_are_not_limited_by_depth_guard() {
        let def = TableDefinition::new("a")
            .with_child("b", TableDefinition::new("b").with_child("a", TableDefinition::reference("a")));
        let builder =
            SchemaBuilder::with_config(BuilderConfig::builder().max_depth(1).build());
        assert!(builder.build_all(&[def]).is_ok());
    }
}
