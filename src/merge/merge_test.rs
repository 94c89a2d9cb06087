//! Tests for diffing and merging whole trees.
//!
//! Every diff is replayed with `apply_changes` to check that it turns the
//! old tree back into the new one.

#[cfg(test)]
mod tests {
    use crate::merge::{get_changes, merge_objects, Conflict, DiffOptions, MergeResult};
    use crate::value::{apply_changes, from_json, from_yaml, Changes, Value};
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

    /// Diffs `before` against `after`, checks the diff, then replays it.
    fn check_sync(before: &str, after: &str, expected: Option<&str>) {
        let before = json(before);
        let after = json(after);
        let diff = get_changes(&before, &after, &DiffOptions::default());
        assert_eq!(diff, expected.map(changes));
        let replayed = apply_changes(&before, &diff.unwrap_or_default(), false);
        assert_eq!(replayed, after);
    }

    #[test]
    fn test_sync_removed_list() {
        check_sync(
            r#"{"thing":"ok","items":[{"name":"hi","value":45}]}"#,
            r#"{"thing":"ok"}"#,
            Some(r#"{"items":null}"#),
        );
        check_sync(r#"{"items":[{"name":"hi"}]}"#, "{}", Some(r#"{"items":null}"#));
    }

    #[test]
    fn test_sync_added_list() {
        check_sync(
            r#"{"thing":"ok"}"#,
            r#"{"thing":"ok","items":[{"name":"hi","value":45}]}"#,
            Some(r#"{"items.[0].name":"hi","items.[0].value":45}"#),
        );
        check_sync(
            "{}",
            r#"{"items":[{"name":"something","value":12},{"name":"somethingElse","value":32}]}"#,
            Some(
                r#"{
                    "items.[0].name":"something",
                    "items.[0].value":12,
                    "items.[1].name":"somethingElse",
                    "items.[1].value":32
                }"#,
            ),
        );
    }

    #[test]
    fn test_sync_grown_list() {
        check_sync(
            r#"{"items":[{"name":"hi"}]}"#,
            r#"{"items":[{"name":"something","value":12},{"name":"somethingElse","value":32}]}"#,
            Some(
                r#"{
                    "items.[0].name":"something",
                    "items.[0].value":12,
                    "items.[1].name":"somethingElse",
                    "items.[1].value":32
                }"#,
            ),
        );
    }

    #[test]
    fn test_sync_shrunk_list() {
        check_sync(
            r#"{"items":[{"name":"a"},{"name":"b"},{"name":"c"}]}"#,
            r#"{"items":[{"name":"a"}]}"#,
            Some(r#"{"items.[1]":null,"items.[2]":null}"#),
        );
    }

    #[test]
    fn test_sync_nested_under_empty_list() {
        check_sync(
            r#"{"big":[]}"#,
            r#"{"big":[{"hairy":{"anything":{"audacious":true,"items":[{"other":"something"}]}}}]}"#,
            Some(
                r#"{
                    "big.[0].hairy.anything.audacious":true,
                    "big.[0].hairy.anything.items.[0].other":"something"
                }"#,
            ),
        );
    }

    #[test]
    fn test_sync_deeply_nested() {
        check_sync(
            r#"{"crazy":{"foo":{"foo":{"foo":{"foo":{"foo":{"stuff":true}}}}}}}"#,
            r#"{"crazy":{"foo":{"foo":{"foo":{"foo":{"foo":{"stuff":false},"items":[{"thing":"yep"}]}}}}}}"#,
            Some(
                r#"{
                    "crazy.foo.foo.foo.foo.foo.stuff":false,
                    "crazy.foo.foo.foo.foo.items.[0].thing":"yep"
                }"#,
            ),
        );
    }

    #[test]
    fn test_sync_unchanged() {
        check_sync(r#"{"name":"henrik"}"#, r#"{"name":"henrik"}"#, None);
    }

    #[test]
    fn test_merge_deeply_nested_conflict() {
        let obj1 = json(
            r#"{"big":[
                {"hairy":{"thing":{"audacious":true}}},
                {"hairy":{"thing":{"audacious":false}}}
            ]}"#,
        );
        let obj2 = json(
            r#"{"big":[
                {"hairy":{"thing":{"audacious":true}}},
                {"hairy":{"thing":{"audacious":true}}}
            ]}"#,
        );
        let expected = MergeResult {
            updated: obj1.clone(),
            conflicts: Some(
                [Conflict::new(
                    "big.[1].hairy.thing.audacious",
                    Value::Bool(false),
                    Value::Bool(true),
                )]
                .into_iter()
                .collect(),
            ),
        };
        assert_eq!(merge_objects(&obj1, &obj2), expected);
    }

    #[test]
    fn test_merge_new_fields_with_conflict() {
        let result = merge_objects(
            &json(r#"{"name":"henrik","other":"same"}"#),
            &json(r#"{"age":37,"other":"different"}"#),
        );
        assert_eq!(result.updated, json(r#"{"name":"henrik","age":37,"other":"same"}"#));
        let conflicts = result.conflicts.unwrap();
        assert_eq!(conflicts.paths(), vec!["other"]);
        assert_eq!(
            conflicts.get("other"),
            Some(&Conflict::new("other", "same".into(), "different".into()))
        );
    }

    #[test]
    fn test_merge_missing_side() {
        let tree = json(r#"{"something":{"foo":{"nested":"hi"}}}"#);
        assert_eq!(merge_objects(&Value::Null, &tree).updated, tree);
        assert_eq!(merge_objects(&tree, &json("{}")).updated, tree);
        assert!(!merge_objects(&tree, &json("{}")).has_conflicts());
    }

    #[test]
    fn test_merge_equal_numbers_do_not_conflict() {
        let result = merge_objects(
            &json(r#"{"a":1,"x":1}"#),
            &from_yaml("a: 1.0\ny: 2\n").unwrap(),
        );
        assert!(!result.has_conflicts());
        assert_eq!(result.updated, json(r#"{"a":1,"x":1,"y":2}"#));
    }

    #[test]
    fn test_merge_never_deletes() {
        let result = merge_objects(&json(r#"{"a":1,"b":2}"#), &json(r#"{"a":1,"c":3}"#));
        assert_eq!(result.updated, json(r#"{"a":1,"b":2,"c":3}"#));
    }

    #[test]
    fn test_merge_result_serializes() {
        let result = merge_objects(&json(r#"{"other":"same"}"#), &json(r#"{"other":"x","age":1}"#));
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({
                "updated": {"age": 1, "other": "same"},
                "conflicts": {"other": ["same", "x"]}
            })
        );

        let clean = merge_objects(&json(r#"{"a":1}"#), &json(r#"{"b":2}"#));
        assert_eq!(
            serde_json::to_value(&clean).unwrap(),
            serde_json::json!({"updated": {"a": 1, "b": 2}})
        );
    }
}
