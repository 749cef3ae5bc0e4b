//! Member service implementation
//!
//! This service handles the congregation roll: registration, profile
//! management, roster search, and status changes.

use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::models::member::{
    CreateMemberRequest, Member, MemberFilter, MembershipStatus, UpdateMemberRequest,
};
use crate::models::{Paged, Pagination};
use crate::services::normalize_listing;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::validation::ValidationErrors;

/// Member service for roster operations
#[derive(Clone)]
pub struct MemberService {
    db: DatabaseService,
}

impl MemberService {
    /// Create a new MemberService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List members with search, status filter, and pagination
    pub async fn list(
        &self,
        church_id: i64,
        mut filter: MemberFilter,
        pagination: Pagination,
    ) -> Result<Paged<Member>> {
        filter.search = normalize_listing(&pagination, filter.search.take())?;
        debug!(church_id = church_id, page = pagination.page, "Listing members");

        let (items, total) = futures::try_join!(
            self.db.members.list(church_id, &filter, pagination),
            self.db.members.count(church_id, &filter),
        )?;

        Ok(Paged::new(items, pagination, total))
    }

    /// Get a single member by ID
    pub async fn get(&self, church_id: i64, member_id: i64) -> Result<Member> {
        self.db
            .members
            .find_by_id(church_id, member_id)
            .await?
            .ok_or(ShepherdError::MemberNotFound { member_id })
    }

    /// Add a member to the roll
    pub async fn create(&self, church_id: i64, request: CreateMemberRequest) -> Result<Member> {
        validate_create(&request)?;

        if let Some(ref email) = request.email {
            if self.db.members.find_by_email(church_id, email).await?.is_some() {
                return Err(ShepherdError::InvalidInput(format!(
                    "Member with email {} already exists",
                    email
                )));
            }
        }

        let member = self.db.members.create(church_id, request).await?;
        info!(church_id = church_id, member_id = member.id, "Member created");

        Ok(member)
    }

    /// Update a member profile
    pub async fn update(
        &self,
        church_id: i64,
        member_id: i64,
        request: UpdateMemberRequest,
    ) -> Result<Member> {
        validate_update(&request)?;

        let member = self
            .db
            .members
            .update(church_id, member_id, request)
            .await?
            .ok_or(ShepherdError::MemberNotFound { member_id })?;

        info!(church_id = church_id, member_id = member_id, "Member updated");
        Ok(member)
    }

    /// Remove a member from the roll
    pub async fn delete(&self, church_id: i64, member_id: i64) -> Result<()> {
        let removed = self.db.members.delete(church_id, member_id).await?;
        if !removed {
            return Err(ShepherdError::MemberNotFound { member_id });
        }

        info!(church_id = church_id, member_id = member_id, "Member deleted");
        Ok(())
    }

    /// Change membership status
    pub async fn set_status(
        &self,
        church_id: i64,
        member_id: i64,
        status: MembershipStatus,
    ) -> Result<Member> {
        let request = UpdateMemberRequest {
            status: Some(status),
            ..Default::default()
        };

        let member = self
            .db
            .members
            .update(church_id, member_id, request)
            .await?
            .ok_or(ShepherdError::MemberNotFound { member_id })?;

        info!(
            church_id = church_id,
            member_id = member_id,
            status = %status,
            "Membership status changed"
        );
        Ok(member)
    }
}

fn validate_create(request: &CreateMemberRequest) -> Result<()> {
    let mut v = ValidationErrors::new();
    v.require("first_name", &request.first_name);
    v.max_length("first_name", &request.first_name, 100);
    v.require("last_name", &request.last_name);
    v.max_length("last_name", &request.last_name, 100);
    if let Some(ref email) = request.email {
        v.email("email", email);
    }
    if let Some(ref phone) = request.phone {
        v.phone("phone", phone);
    }
    v.into_result()
}

fn validate_update(request: &UpdateMemberRequest) -> Result<()> {
    let mut v = ValidationErrors::new();
    if let Some(ref first_name) = request.first_name {
        v.require("first_name", first_name);
        v.max_length("first_name", first_name, 100);
    }
    if let Some(ref last_name) = request.last_name {
        v.require("last_name", last_name);
        v.max_length("last_name", last_name, 100);
    }
    if let Some(ref email) = request.email {
        v.email("email", email);
    }
    if let Some(ref phone) = request.phone {
        v.phone("phone", phone);
    }
    v.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn base_request() -> CreateMemberRequest {
        CreateMemberRequest {
            first_name: "Ruth".to_string(),
            last_name: "Mwangi".to_string(),
            email: Some("ruth.mwangi@example.org".to_string()),
            phone: Some("+254 700 123456".to_string()),
            address: None,
            status: None,
            joined_on: None,
            baptized_on: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_create_payload() {
        assert!(validate_create(&base_request()).is_ok());
    }

    #[test]
    fn test_missing_first_name_blocks_create() {
        let mut request = base_request();
        request.first_name = " ".to_string();
        let err = validate_create(&request).unwrap_err();
        assert_matches!(err, ShepherdError::Validation(errors) => {
            assert!(errors.errors.iter().any(|e| e.field == "first_name"));
        });
    }

    #[test]
    fn test_bad_email_blocks_create() {
        let mut request = base_request();
        request.email = Some("nope".to_string());
        assert!(validate_create(&request).is_err());
    }

    #[test]
    fn test_update_ignores_absent_fields() {
        let request = UpdateMemberRequest::default();
        assert!(validate_update(&request).is_ok());
    }

    #[test]
    fn test_update_checks_present_fields() {
        let request = UpdateMemberRequest {
            email: Some("broken@".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&request).is_err());
    }
}
