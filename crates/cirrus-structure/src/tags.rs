//! Tag maps

use crate::api::Tag;
use std::collections::BTreeMap;

/// Convert a tag map into API tags, ordered by key
pub fn expand_tags(tags: &BTreeMap<String, String>) -> Vec<Tag> {
    tags.iter()
        .map(|(key, value)| Tag {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Convert API tags into a tag map; a repeated key keeps its last value
pub fn flatten_tags(tags: &[Tag]) -> BTreeMap<String, String> {
    tags.iter()
        .map(|tag| (tag.key.clone(), tag.value.clone()))
        .collect()
}
