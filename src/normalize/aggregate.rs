use log::debug;
use crate::models::{PodOutcomeMap, RawResponse};
use crate::normalize::builder::build_outcome_tree;

/// Build the outcome tree of every pod in a response
///
/// Pods are independent: nothing correlates across pods. A pod without group
/// fields maps to an empty outcome list.
pub fn aggregate_pods(response: &RawResponse) -> PodOutcomeMap {
    let mut map = PodOutcomeMap::new();
    for (pod_name, fields) in response {
        let groups = build_outcome_tree(fields);
        debug!(
            "Pod {}: {} fields -> {} outcomes, {} tasks",
            pod_name,
            fields.len(),
            groups.len(),
            groups.iter().map(|g| g.content.len()).sum::<usize>()
        );
        map.insert(pod_name.clone(), groups);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, RawFieldRecord};

    fn record(name: &str, value: bool) -> RawFieldRecord {
        RawFieldRecord::new(name, Some(FieldValue::Bool(value)))
    }

    #[test]
    fn test_aggregates_each_pod_independently() {
        let response: RawResponse = vec![
            (
                "Trainee".to_string(),
                vec![
                    ("CAR_Outcome_Career__c".to_string(), record("Career", false)),
                    ("CAR_Youth_Resume__c".to_string(), record("Resume", true)),
                ],
            ),
            (
                "Associate".to_string(),
                vec![
                    // Marker with no task in this pod; the Trainee task does not count
                    ("CAR_Outcome_Career__c".to_string(), record("Career", false)),
                    ("CAR_BOOL_Resume__c".to_string(), record("", true)),
                ],
            ),
            ("Partner".to_string(), vec![]),
        ];

        let map = aggregate_pods(&response);
        assert_eq!(map.pod_names(), vec!["Trainee", "Associate", "Partner"]);
        assert_eq!(map.get("Trainee").unwrap()[0].content.len(), 1);
        assert!(!map.get("Trainee").unwrap()[0].content[0].star_is_filled);
        assert!(map.get("Associate").unwrap()[0].content.is_empty());
        assert!(map.get("Partner").unwrap().is_empty());
    }

    #[test]
    fn test_empty_response() {
        assert!(aggregate_pods(&Vec::new()).is_empty());
    }
}
