//! Search preferences and query composition.

use serde::{Deserialize, Deserializer, Serialize};

/// Topic value meaning "no topic filter".
pub const ALL_TOPICS: &str = "all";

/// Per-request search filters sent by the front end.
///
/// Deserializes from `{"topics": [..], "customSearch": ".."}`; both fields
/// may be omitted or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub custom_search: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Preferences {
    pub fn new(topics: Vec<String>, custom_search: Option<String>) -> Self {
        Self { topics, custom_search }
    }

    /// True when the topics should be ignored: none given, or exactly `["all"]`.
    pub fn is_all_topics(&self) -> bool {
        match self.topics.as_slice() {
            [] => true,
            [only] => only == ALL_TOPICS,
            _ => false,
        }
    }
}

/// Build the search query for `base` narrowed by `prefs`.
///
/// Produces `base`, then ` AND (t1 OR t2 ...)` for a real topic list, then
/// ` AND <custom>` for a non-empty custom term. Input is not escaped.
pub fn compose_query(base: &str, prefs: &Preferences) -> String {
    let mut query = base.to_string();

    if !prefs.is_all_topics() {
        query.push_str(" AND (");
        query.push_str(&prefs.topics.join(" OR "));
        query.push(')');
    }

    if let Some(custom) = prefs.custom_search.as_deref()
        && !custom.is_empty()
    {
        query.push_str(" AND ");
        query.push_str(custom);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(topics: &[&str], custom: Option<&str>) -> Preferences {
        Preferences::new(topics.iter().map(|t| t.to_string()).collect(), custom.map(str::to_string))
    }

    #[test]
    fn test_default_preferences_use_base_only() {
        assert_eq!(compose_query("SpaceX", &Preferences::default()), "SpaceX");
    }

    #[test]
    fn test_all_sentinel_is_ignored() {
        assert_eq!(compose_query("SpaceX", &prefs(&["all"], None)), "SpaceX");
    }

    #[test]
    fn test_single_topic() {
        assert_eq!(compose_query("SpaceX", &prefs(&["Starship"], None)), "SpaceX AND (Starship)");
    }

    #[test]
    fn test_topics_form_disjunction() {
        let query = compose_query("SpaceX", &prefs(&["Starship", "Falcon 9", "Starlink"], None));
        assert_eq!(query, "SpaceX AND (Starship OR Falcon 9 OR Starlink)");
    }

    #[test]
    fn test_all_mixed_with_other_topics_is_kept() {
        let query = compose_query("SpaceX", &prefs(&["all", "Dragon"], None));
        assert_eq!(query, "SpaceX AND (all OR Dragon)");
    }

    #[test]
    fn test_custom_search_appended() {
        let query = compose_query("SpaceX", &prefs(&[], Some("launch delay")));
        assert_eq!(query, "SpaceX AND launch delay");
    }

    #[test]
    fn test_empty_custom_search_ignored() {
        assert_eq!(compose_query("SpaceX", &prefs(&[], Some(""))), "SpaceX");
    }

    #[test]
    fn test_topics_then_custom_search() {
        let query = compose_query("SpaceX", &prefs(&["Starship", "Raptor"], Some("Boca Chica")));
        assert_eq!(query, "SpaceX AND (Starship OR Raptor) AND Boca Chica");
    }

    #[test]
    fn test_input_passed_through_verbatim() {
        let query = compose_query("SpaceX", &prefs(&["a\"b"], Some("NOT (")));
        assert_eq!(query, "SpaceX AND (a\"b) AND NOT (");
    }

    #[test]
    fn test_every_topic_appears_in_clause() {
        let topics = ["Crew", "Cargo", "Tesla", "Mars"];
        let query = compose_query("SpaceX", &prefs(&topics, None));
        let clause = query.strip_prefix("SpaceX AND (").and_then(|q| q.strip_suffix(')')).unwrap();
        let parts: Vec<&str> = clause.split(" OR ").collect();
        assert_eq!(parts, topics);
    }

    #[test]
    fn test_deserialize_front_end_payload() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"topics": ["Starlink"], "customSearch": "outage"}"#).unwrap();
        assert_eq!(prefs.topics, vec!["Starlink"]);
        assert_eq!(prefs.custom_search.as_deref(), Some("outage"));
    }

    #[test]
    fn test_deserialize_null_fields() {
        let prefs: Preferences = serde_json::from_str(r#"{"topics": null, "customSearch": null}"#).unwrap();
        assert_eq!(prefs, Preferences::default());

        let prefs: Preferences = serde_json::from_str(r#"{"topics": null, "customSearch": "launch"}"#).unwrap();
        assert_eq!(compose_query("SpaceX", &prefs), "SpaceX AND launch");
    }

    #[test]
    fn test_deserialize_rejects_non_list_topics() {
        assert!(serde_json::from_str::<Preferences>(r#"{"topics": "Starlink"}"#).is_err());
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
