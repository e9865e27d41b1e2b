use super::profile::ClientRecord;
use crate::PlanneticResult;

/// Supplies the full client book for one analytics pass.
///
/// Implementations wrap the relational store (or a file export of it).
/// Failures are returned as-is; the analytics layer never retries.
pub trait ClientRecordProvider {
    fn list(&self) -> PlanneticResult<Vec<ClientRecord>>;
}

impl ClientRecordProvider for Vec<ClientRecord> {
    fn list(&self) -> PlanneticResult<Vec<ClientRecord>> {
        Ok(self.clone())
    }
}

impl ClientRecordProvider for [ClientRecord] {
    fn list(&self) -> PlanneticResult<Vec<ClientRecord>> {
        Ok(self.to_vec())
    }
}
