//! services/app/src/state/lookups.rs
//!
//! Thin fetchers for the auxiliary lookup lists (tutors, groups, activity
//! types) used to populate form pickers and resolve display names. No
//! caching policy here; consumers fetch once per mount.

use activity_core::domain::{ActivityType, Group, Tutor};
use activity_core::ports::{LookupService, PortResult};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Everything a form screen needs to populate its pickers.
#[derive(Debug, Clone)]
pub struct LookupData {
    pub tutors: Vec<Tutor>,
    pub groups: Vec<Group>,
    pub activity_types: Vec<ActivityType>,
}

impl LookupData {
    pub fn tutor_name(&self, id: Uuid) -> Option<&str> {
        self.tutors.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }

    pub fn group_name(&self, id: Uuid) -> Option<&str> {
        self.groups.iter().find(|g| g.id == id).map(|g| g.name.as_str())
    }

    pub fn activity_type(&self, id: Uuid) -> Option<&ActivityType> {
        self.activity_types.iter().find(|a| a.id == id)
    }
}

/// Fetcher over the lookup port.
#[derive(Clone)]
pub struct Lookups {
    api: Arc<dyn LookupService>,
}

impl Lookups {
    pub fn new(api: Arc<dyn LookupService>) -> Self {
        Self { api }
    }

    pub async fn tutors(&self) -> PortResult<Vec<Tutor>> {
        self.api.list_tutors().await
    }

    pub async fn groups(&self) -> PortResult<Vec<Group>> {
        self.api.list_groups().await
    }

    pub async fn activity_types(&self) -> PortResult<Vec<ActivityType>> {
        self.api.list_activity_types().await
    }

    /// Fetches all three lists in one go for a form mount.
    pub async fn load_all(&self) -> PortResult<LookupData> {
        let (tutors, groups, activity_types) = futures::try_join!(
            self.api.list_tutors(),
            self.api.list_groups(),
            self.api.list_activity_types(),
        )?;
        debug!(
            tutors = tutors.len(),
            groups = groups.len(),
            activity_types = activity_types.len(),
            "Lookup lists loaded"
        );
        Ok(LookupData {
            tutors,
            groups,
            activity_types,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeLookups;

    #[async_trait]
    impl LookupService for FakeLookups {
        async fn list_tutors(&self) -> PortResult<Vec<Tutor>> {
            Ok(vec![Tutor { id: Uuid::nil(), name: "Budi".to_string() }])
        }

        async fn list_groups(&self) -> PortResult<Vec<Group>> {
            Ok(vec![Group { id: Uuid::nil(), name: "Kelompok A".to_string() }])
        }

        async fn list_activity_types(&self) -> PortResult<Vec<ActivityType>> {
            Ok(vec![ActivityType {
                id: Uuid::nil(),
                name: "Bimbingan Belajar".to_string(),
                supports_attendance: true,
            }])
        }
    }

    #[tokio::test]
    async fn load_all_gathers_every_list_and_resolves_names() {
        let lookups = Lookups::new(Arc::new(FakeLookups));
        let data = lookups.load_all().await.unwrap();
        assert_eq!(data.tutor_name(Uuid::nil()), Some("Budi"));
        assert_eq!(data.group_name(Uuid::nil()), Some("Kelompok A"));
        assert!(data.activity_type(Uuid::nil()).unwrap().supports_attendance);
    }
}
