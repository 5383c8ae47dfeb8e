//! Turning model output into candidate topics.

/// Split a comma-separated model response into at most `max_topics` topics.
/// Each topic is trimmed and gets an upper-case first letter; empty entries
/// are dropped before truncating.
pub fn parse_topics(response: &str, max_topics: usize) -> Vec<String> {
    response
        .split(',')
        .map(|item| capitalize(item.trim()))
        .filter(|item| !item.is_empty())
        .take(max_topics)
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep the topics that are new: not one of the parent labels (compared
/// case-insensitively), not blank, and not already generated according to
/// `already_generated`.
pub fn filter_new_topics<F>(topics: Vec<String>, parent_labels: &[&str], already_generated: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let parents: Vec<String> = parent_labels.iter().map(|l| l.to_lowercase()).collect();

    topics
        .into_iter()
        .filter(|topic| {
            !topic.trim().is_empty()
                && !parents.contains(&topic.to_lowercase())
                && !already_generated(topic)
        })
        .collect()
}
