//! Tests for the TreeSchema facade.

#[cfg(test)]
mod tests {
    use crate::merge::{get_changes, Conflict, DiffOptions, MergeResult};
    use crate::schema::{Definition, TypeDecl};
    use crate::typed::{build_definition, TreeSchema, ValidationError};
    use crate::value::{apply_changes, from_json, Callable, Changes, Value};
    use pretty_assertions::assert_eq;

    fn json(s: &str) -> Value {
        from_json(s).unwrap()
    }

    fn changes(s: &str) -> Changes {
        match json(s) {
            Value::Map(m) => m.fields.into_iter().collect(),
            other => panic!("changes must be an object, got {}", other),
        }
    }

    fn schema(entries: &[(&str, &str)]) -> TreeSchema {
        let definition: Definition = entries.iter().copied().collect();
        build_definition(&definition)
    }

    #[test]
    fn test_set_value() {
        let s = schema(&[
            ("items.[]", "arr"),
            ("items.[].something.{}.else.[].crazy", "str"),
        ]);
        let empty = json("{}");

        assert_eq!(
            s.set_value(&empty, "items.[0].something.hi.else.[0].crazy", &"hi".into(), true),
            Ok(json(r#"{"items":[{"something":{"hi":{"else":[{"crazy":"hi"}]}}}]}"#))
        );
        assert_eq!(
            s.set_value(&empty, "items.[0].something.hi.else.[0].crazys", &"hi".into(), true),
            Err(ValidationError::invalid_path("items.0.something.hi.else.0.crazys"))
        );
        assert!(s
            .set_value(&empty, "items.[0].something.hi.else.[0].crazys", &"hi".into(), false)
            .is_ok());
    }

    #[test]
    fn test_set_value_validates_whole_subtrees() {
        let s = schema(&[
            ("items.[]", "arr"),
            ("items.[].something.{}.else.[].crazy", "str"),
        ]);
        let empty = json("{}");

        assert_eq!(
            s.set_value(&empty, "silliness", &json(r#"[{"ok":"you"}]"#), true),
            Err(ValidationError::invalid_path("silliness.0.ok"))
        );
        assert!(s
            .set_value(
                &empty,
                "items",
                &json(r#"[{"something":{"foo":{"else":[{"crazy":"yeah"}]}}}]"#),
                true
            )
            .is_ok());
        assert_eq!(
            s.set_value(
                &empty,
                "items",
                &json(r#"[{"something":{"foo":{"else":[{"crazy":5}]}}}]"#),
                true
            ),
            Err(ValidationError::invalid_value(
                "items.0.something.foo.else.0.crazy",
                Value::Int(5)
            ))
        );
    }

    #[test]
    fn test_empty_writes_are_pruned_before_validation() {
        let s = schema(&[("name", "str")]);
        assert_eq!(s.set_value(&json("{}"), "ridiculous", &json("[]"), true), Ok(json("{}")));
    }

    #[test]
    fn test_update_merges_objects() {
        let s = schema(&[
            ("stuff.{}.id", "str"),
            ("stuff.{}.name", "str"),
            ("stuff.{}.value", "positiveInt"),
        ]);
        let res = s
            .update(&json("{}"), &changes(r#"{"stuff.d_0":{"id":"d_0","name":"Joe"}}"#), true)
            .unwrap();
        assert_eq!(res, json(r#"{"stuff":{"d_0":{"id":"d_0","name":"Joe"}}}"#));

        let res2 = s.update(&res, &changes(r#"{"stuff.d_0":{"value":45}}"#), true).unwrap();
        assert_eq!(res2, json(r#"{"stuff":{"d_0":{"id":"d_0","name":"Joe","value":45}}}"#));
    }

    #[test]
    fn test_remove_list_members_by_position() {
        let s = schema(&[("stuff", "arr"), ("stuff.[].id", "str")]);
        let res = s
            .update(&json("{}"), &changes(r#"{"stuff":[{"id":"one"},{"id":"two"},{"id":"three"}]}"#), true)
            .unwrap();
        assert_eq!(res, json(r#"{"stuff":[{"id":"one"},{"id":"two"},{"id":"three"}]}"#));

        let res2 = s.set_value(&res, "stuff.1", &Value::Null, true).unwrap();
        assert_eq!(res2, json(r#"{"stuff":[{"id":"one"},{"id":"three"}]}"#));
        let res3 = s.set_value(&res2, "stuff.1", &Value::Null, true).unwrap();
        assert_eq!(res3, json(r#"{"stuff":[{"id":"one"}]}"#));
        let res4 = s.set_value(&res3, "stuff.0", &Value::Null, true).unwrap();
        assert_eq!(res4, json("{}"));
    }

    #[test]
    fn test_batch_deletions_address_the_original_list() {
        let s = schema(&[("stuff", "arr"), ("stuff.[].id", "str")]);
        let start = json(r#"{"stuff":[{"id":"one"},{"id":"two"},{"id":"three"}]}"#);
        assert_eq!(
            s.update(&start, &changes(r#"{"stuff.[0]":null,"stuff.[1]":null}"#), true),
            Ok(json(r#"{"stuff":[{"id":"three"}]}"#))
        );
    }

    #[test]
    fn test_remove_emptied_objects() {
        let s = schema(&[("stuff.{}.id", "str")]);
        let res = s
            .update(&json(r#"{"stuff":{"foo":{"id":"one"}}}"#), &changes(r#"{"stuff.foo":null}"#), true)
            .unwrap();
        assert_eq!(res, json("{}"));

        let s2 = schema(&[("stuff", "str")]);
        assert_eq!(
            s2.update(&json("{}"), &changes(r#"{"stuff":"hi"}"#), true),
            Ok(json(r#"{"stuff":"hi"}"#))
        );
        assert_eq!(
            s2.update(&json("{}"), &changes(r#"{"stuff":null}"#), true),
            Ok(json("{}"))
        );
    }

    #[test]
    fn test_diff_then_update_round_trips() {
        let s = schema(&[
            ("thing", "str"),
            ("items.[].name", "str"),
            ("items.[].value", "positiveInt"),
        ]);
        let cases = [
            (r#"{"thing":"ok","items":[{"name":"hi","value":45}]}"#, r#"{"thing":"ok"}"#),
            (r#"{"thing":"ok"}"#, r#"{"thing":"ok","items":[{"name":"hi","value":45}]}"#),
            (r#"{"items":[{"name":"hi"}]}"#, "{}"),
            (
                r#"{"items":[{"name":"hi"}]}"#,
                r#"{"items":[{"name":"something","value":12},{"name":"somethingElse","value":32}]}"#,
            ),
            (r#"{"items":[{"name":"a"},{"name":"b"},{"name":"c"}]}"#, r#"{"items":[{"name":"c"}]}"#),
        ];
        for (before, after) in cases {
            let before = json(before);
            let after = json(after);
            let diff = get_changes(&before, &after, &DiffOptions::default()).unwrap_or_default();
            assert_eq!(s.update(&before, &diff, true), Ok(after));
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let s = schema(&[("items.[].name", "str"), ("items.[].value", "positiveInt")]);
        let diff = changes(r#"{"items.[0].name":"a","items.[1].value":2}"#);
        let once = s.update(&json("{}"), &diff, true).unwrap();
        let twice = s.update(&once, &diff, true).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, json(r#"{"items":[{"name":"a"},{"value":2}]}"#));
    }

    #[test]
    fn test_merge() {
        let s = schema(&[("name", "str"), ("age", "positiveInt"), ("other", "str")]);

        assert_eq!(
            s.merge(&json(r#"{"name":"henrik"}"#), &json(r#"{"age":37}"#), true),
            Ok(MergeResult {
                updated: json(r#"{"name":"henrik","age":37}"#),
                conflicts: None,
            })
        );

        assert_eq!(
            s.merge(
                &json(r#"{"name":"henrik","other":"same"}"#),
                &json(r#"{"age":37,"other":"different"}"#),
                true
            ),
            Ok(MergeResult {
                updated: json(r#"{"name":"henrik","age":37,"other":"same"}"#),
                conflicts: Some(
                    [Conflict::new("other", "same".into(), "different".into())]
                        .into_iter()
                        .collect()
                ),
            })
        );
    }

    #[test]
    fn test_merge_rejects_invalid_result() {
        let s = schema(&[("name", "str"), ("age", "positiveInt"), ("other", "str")]);
        let err = s
            .merge(
                &json(r#"{"name":"henrik","other":"same"}"#),
                &json(r#"{"age":37,"other":"different","blah":"not known path"}"#),
                true,
            )
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_path("blah"));
        assert_eq!(err.to_string(), "invalid path: blah");
    }

    #[test]
    fn test_merge_with_opaque_objects() {
        let s = schema(&[("something", "obj"), ("something.{}.nested", "str")]);
        let tree = json(r#"{"something":{"foo":{"nested":"hi"}}}"#);
        assert_eq!(s.merge(&Value::Null, &tree, true).map(|r| r.updated), Ok(tree.clone()));
        assert_eq!(s.merge(&tree, &json("{}"), true).map(|r| r.updated), Ok(tree));
    }

    #[test]
    fn test_numeric_keys() {
        let res = apply_changes(&json("{}"), &changes(r#"{"something.1.else":"hi"}"#), true);
        assert_eq!(res, json(r#"{"something":{"1":{"else":"hi"}}}"#));

        // Lists never keep holes.
        let res2 = apply_changes(&json("{}"), &changes(r#"{"something.[1].else":"hi"}"#), true);
        assert_eq!(res2, json(r#"{"something":[{"else":"hi"}]}"#));
    }

    #[test]
    fn test_dynamic_first_segment() {
        let s = schema(&[("{}.id", "str")]);
        assert_eq!(
            s.update(&json("{}"), &changes(r#"{"foo.id":"thing"}"#), true),
            Ok(json(r#"{"foo":{"id":"thing"}}"#))
        );
        assert!(s.update(&json("{}"), &changes(r#"{"foo.other":"thing"}"#), true).is_err());
    }

    #[test]
    fn test_obj_and_func_values() {
        let s = schema(&[("things", "obj")]);
        assert_eq!(
            s.update(&json("{}"), &changes(r#"{"things":{"something":"cool"}}"#), true),
            Ok(json(r#"{"things":{"something":"cool"}}"#))
        );

        let s = schema(&[("things", "func")]);
        let func = Value::Func(Callable::new(|_| Value::Null));
        let mut update = Changes::new();
        update.insert("things".to_string(), func.clone());
        let res = s.update(&json("{}"), &update, true).unwrap();
        assert_eq!(res.member("things"), Some(&func));
    }

    #[test]
    fn test_deeply_nested_entries() {
        let s = schema(&[
            ("other", "str"),
            ("systemsReview.{}", "str"),
            ("systemsReview.{}.id", "str"),
            ("systemsReview.{}.entries", "arr"),
            ("systemsReview.{}.entries.[].editing", "bool"),
            ("systemsReview.{}.entries.[].details.[]", "arr"),
            ("systemsReview.{}.entries.[].details.[].name", "str"),
        ]);
        let start = json(r#"{"other":"thing"}"#);
        let res = s
            .update(
                &start,
                &changes(r#"{"systemsReview.cns.entries.[0]":{"details":[{"name":"hi"}],"editing":true}}"#),
                true,
            )
            .unwrap();
        assert_eq!(
            res,
            json(
                r#"{"other":"thing","systemsReview":{"cns":{"entries":[
                    {"details":[{"name":"hi"}],"editing":true}
                ]}}}"#
            )
        );

        let removals = [
            r#"{"systemsReview.cns.entries":null}"#,
            r#"{"systemsReview.cns.entries.[0]":null}"#,
            r#"{"systemsReview.cns.entries.[0]":{"details":[{"name":null}],"editing":null}}"#,
        ];
        for removal in removals {
            assert_eq!(s.update(&res, &changes(removal), true), Ok(start.clone()));
        }
    }

    #[test]
    fn test_any_of_declarations() {
        let definition = Definition::new()
            .with("id", TypeDecl::any_of(["str", "int"]))
            .with("flag", "bool");
        let s = build_definition(&definition);
        assert!(s.validate(&json(r#"{"id":"x","flag":true}"#)).is_ok());
        assert!(s.validate(&json(r#"{"id":4,"flag":true}"#)).is_ok());
        assert_eq!(
            s.validate(&json(r#"{"id":4,"flag":"yes"}"#)),
            Err(ValidationError::invalid_value("flag", "yes".into()))
        );
    }

    #[test]
    fn test_from_yaml() {
        let s = TreeSchema::from_yaml(
            r#"
definition:
  color: color
  "items.[].name": str
matches:
  color: [red, green]
"#,
        )
        .unwrap();
        assert!(s.validate(&json(r#"{"color":"red","items":[{"name":"x"}]}"#)).is_ok());
        assert_eq!(
            s.validate(&json(r#"{"color":"blue"}"#)),
            Err(ValidationError::invalid_value("color", "blue".into()))
        );

        let plain = TreeSchema::from_yaml("name: str\nage: positiveInt\n").unwrap();
        assert!(plain.validate(&json(r#"{"name":"a","age":3}"#)).is_ok());
        assert!(plain.registry().contains("timestamp"));
    }

    #[test]
    fn test_input_is_never_modified() {
        let s = schema(&[("a", "int"), ("b", "int")]);
        let tree = json(r#"{"a":1}"#);
        let _ = s.set_value(&tree, "b", &Value::Int(2), true).unwrap();
        let _ = s.update(&tree, &changes(r#"{"a":null}"#), true).unwrap();
        assert_eq!(tree, json(r#"{"a":1}"#));
    }
}
