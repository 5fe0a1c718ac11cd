//! Deployed-instance lookup.
//!
//! Partner backends index instances by their own release names, not by the
//! standardized app id. Every lookup path goes through [`InstanceQuery`] so
//! there is a single matching rule for all of them.

/// Read access to the fields of a partner instance record used for matching
pub trait InstanceRecord {
    /// Partner-side release name of the application
    fn release_name(&self) -> Option<&str>;
    /// Zone the instance runs in
    fn zone_id(&self) -> Option<&str>;
    /// Partner-assigned instance identifier
    fn instance_id(&self) -> Option<&str>;
}

/// Match criteria for a deployed instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceQuery<'a> {
    pub release_name: &'a str,
    pub zone_id: Option<&'a str>,
    pub instance_id: Option<&'a str>,
}

impl<'a> InstanceQuery<'a> {
    pub fn new(release_name: &'a str, zone_id: &'a str) -> Self {
        Self {
            release_name,
            zone_id: Some(zone_id),
            instance_id: None,
        }
    }

    /// Match the release wherever it runs
    pub fn in_any_zone(release_name: &'a str) -> Self {
        Self {
            release_name,
            zone_id: None,
            instance_id: None,
        }
    }

    /// Also require a specific instance id
    pub fn with_instance(mut self, instance_id: Option<&'a str>) -> Self {
        self.instance_id = instance_id;
        self
    }

    pub fn matches<R: InstanceRecord + ?Sized>(&self, record: &R) -> bool {
        record.release_name() == Some(self.release_name)
            && self.zone_id.map_or(true, |zone| record.zone_id() == Some(zone))
            && self
                .instance_id
                .map_or(true, |id| record.instance_id() == Some(id))
    }
}

/// All records matching `query`, in partner order
pub fn filter_instances<'r, R: InstanceRecord>(
    records: &'r [R],
    query: &InstanceQuery<'_>,
) -> Vec<&'r R> {
    records.iter().filter(|record| query.matches(*record)).collect()
}

/// First record matching `query`, in partner order
pub fn find_instance<'r, R: InstanceRecord>(
    records: &'r [R],
    query: &InstanceQuery<'_>,
) -> Option<&'r R> {
    records.iter().find(|record| query.matches(*record))
}
