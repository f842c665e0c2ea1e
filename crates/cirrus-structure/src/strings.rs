//! String list helpers

/// Copy a configured string list, dropping empty entries
pub fn expand_string_list(configured: &[String]) -> Vec<String> {
    configured
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect()
}

/// Sorted copy of a string list
///
/// The API returns some lists in no particular order; sorting keeps
/// comparisons against configuration stable.
pub fn sorted_strings(list: &[String]) -> Vec<String> {
    let mut sorted = list.to_vec();
    sorted.sort();
    sorted
}
