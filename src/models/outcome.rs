use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use crate::models::{Pod, TaskEntry};

/// A named outcome category and the tasks that belong to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeGroup {
    /// 3-character group code taken from the outcome field name
    pub id: String,
    pub title: String,
    pub content: Vec<TaskEntry>,
    /// Whether the CRM marks the outcome itself as achieved
    #[serde(default)]
    pub completed: bool,
}

impl OutcomeGroup {
    pub fn new(id: String, title: String, completed: bool) -> Self {
        Self {
            id,
            title,
            content: Vec::new(),
            completed,
        }
    }

    /// First task with the given derived identifier
    pub fn find_task(&self, task_id: &str) -> Option<&TaskEntry> {
        self.content.iter().find(|t| t.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut TaskEntry> {
        self.content.iter_mut().find(|t| t.id == task_id)
    }

    pub fn checked_count(&self) -> usize {
        self.content.iter().filter(|t| t.checked).count()
    }
}

/// Normalized snapshot: pod name -> ordered outcome groups
///
/// Pods keep the order the response listed them in. The map is built in one
/// go by the normalizer and treated as read-only afterwards; serializes as a
/// JSON object keyed by pod name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodOutcomeMap {
    pods: Vec<(String, Vec<OutcomeGroup>)>,
}

impl PodOutcomeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pod, replacing an earlier entry with the same name in place
    pub fn insert(&mut self, pod_name: String, groups: Vec<OutcomeGroup>) {
        if let Some(entry) = self.pods.iter_mut().find(|(name, _)| *name == pod_name) {
            entry.1 = groups;
        } else {
            self.pods.push((pod_name, groups));
        }
    }

    pub fn get(&self, pod_name: &str) -> Option<&[OutcomeGroup]> {
        self.pods
            .iter()
            .find(|(name, _)| name == pod_name)
            .map(|(_, groups)| groups.as_slice())
    }

    /// Look up a pod by tier, accepting display or CRM map names as keys
    pub fn get_pod(&self, pod: Pod) -> Option<(&str, &[OutcomeGroup])> {
        self.pods
            .iter()
            .find(|(name, _)| Pod::from_name(name) == Some(pod))
            .map(|(name, groups)| (name.as_str(), groups.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OutcomeGroup])> {
        self.pods
            .iter()
            .map(|(name, groups)| (name.as_str(), groups.as_slice()))
    }

    pub fn pod_names(&self) -> Vec<&str> {
        self.pods.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    /// Find a task in a pod by its CRM field name
    pub fn find_task(&self, pod: Pod, api_key: &str) -> Option<&TaskEntry> {
        let (_, groups) = self.get_pod(pod)?;
        groups
            .iter()
            .flat_map(|g| g.content.iter())
            .find(|t| t.api_key == api_key)
    }
}

impl Serialize for PodOutcomeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pods.len()))?;
        for (name, groups) in &self.pods {
            map.serialize_entry(name, groups)?;
        }
        map.end()
    }
}
