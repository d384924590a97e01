use indexmap::IndexMap;
use serde::Deserialize;

/// One club offering as served by `GET /activities`.
///
/// The name is the catalog key on the wire and is copied into the struct
/// when the catalog is decoded.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Activity {
    #[serde(skip)]
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
    #[serde(default)]
    pub instructor: Option<String>,
}

impl Activity {
    /// Remaining capacity. Saturates at zero when the roster is over capacity.
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }
}

/// All activities known to the board, in the order the server sent them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(from = "IndexMap<String, Activity>")]
pub struct Catalog {
    activities: IndexMap<String, Activity>,
}

impl From<IndexMap<String, Activity>> for Catalog {
    fn from(mut activities: IndexMap<String, Activity>) -> Self {
        for (name, activity) in activities.iter_mut() {
            activity.name.clone_from(name);
        }
        Self { activities }
    }
}

impl FromIterator<Activity> for Catalog {
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        Self {
            activities: iter.into_iter().map(|a| (a.name.clone(), a)).collect(),
        }
    }
}

impl Catalog {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.get(name)
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.activities.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.activities.keys().map(String::as_str)
    }
}

/// Body of a mutation response. Success carries `message`, failure carries `detail`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
