use serde::Deserialize;

/// A field that arrives either as a bare item or as a sequence of items.
///
/// Markup-to-tree conversion cannot tell a one-element list from a scalar
/// child, so every repeatable field goes through this type and is read back
/// with [`OneOrMany::into_vec`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        name: String,
    }

    #[test]
    fn test_single_object_becomes_one_element() {
        let v: OneOrMany<Item> = serde_json::from_value(json!({"name": "a"})).unwrap();
        assert_eq!(v.into_vec(), vec![Item { name: "a".into() }]);
    }

    #[test]
    fn test_sequence_is_kept_in_order() {
        let v: OneOrMany<Item> =
            serde_json::from_value(json!([{"name": "a"}, {"name": "b"}])).unwrap();
        let names: Vec<String> = v.into_vec().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_sequence() {
        let v: OneOrMany<Item> = serde_json::from_value(json!([])).unwrap();
        assert!(v.into_vec().is_empty());
    }
}
