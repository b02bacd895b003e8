use talant_shared::{OwnerId, ProfileId};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::{ProfileFields, ProfileRecord};
use crate::store::ProfileStore;

impl ProfileStore {
    pub fn list(&self) -> Result<Vec<ProfileRecord>> {
        self.load()
    }

    pub fn get_by_id(&self, id: &ProfileId) -> Result<Option<ProfileRecord>> {
        self.read(|records| records.iter().find(|r| &r.id == id).cloned())
    }

    pub fn get_by_owner(&self, owner: &OwnerId) -> Result<Option<ProfileRecord>> {
        self.read(|records| records.iter().find(|r| &r.owner_id == owner).cloned())
    }

    /// Create the owner's profile. Each owner may hold at most one.
    pub fn create(&self, owner: &OwnerId, fields: ProfileFields) -> Result<ProfileRecord> {
        fields.validate()?;

        let record = self.modify(|records| {
            if records.iter().any(|r| &r.owner_id == owner) {
                debug!(owner = %owner, "profile already exists");
                return Err(StoreError::DuplicateOwner);
            }
            let record = ProfileRecord::new(owner.clone(), fields);
            records.push(record.clone());
            Ok(record)
        })?;

        info!(id = %record.id, owner = %owner, "profile created");
        Ok(record)
    }

    /// Replace the editable fields of the profile matching both `id` and
    /// `owner`. A wrong id and a foreign owner fail the same way.
    pub fn update(
        &self,
        id: &ProfileId,
        owner: &OwnerId,
        fields: ProfileFields,
    ) -> Result<ProfileRecord> {
        fields.validate()?;

        let record = self.modify(|records| {
            let record = records
                .iter_mut()
                .find(|r| &r.id == id && &r.owner_id == owner)
                .ok_or_else(|| {
                    debug!(id = %id, owner = %owner, "profile not found or access denied");
                    StoreError::ForbiddenOrNotFound
                })?;
            record.apply(fields);
            Ok(record.clone())
        })?;

        info!(id = %id, owner = %owner, "profile updated");
        Ok(record)
    }

    /// Remove the owner's profile. Its photo is detached before the record
    /// leaves the collection.
    pub fn delete(&self, owner: &OwnerId) -> Result<ProfileRecord> {
        let removed = self.modify(|records| {
            let index = records
                .iter()
                .position(|r| &r.owner_id == owner)
                .ok_or(StoreError::NotFound)?;
            self.detach_record(&mut records[index]);
            Ok(records.remove(index))
        })?;

        info!(id = %removed.id, owner = %owner, "profile deleted");
        Ok(removed)
    }
}
