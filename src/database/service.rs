//! Database service layer
//!
//! This module provides a high-level interface to database operations,
//! including the cross-repository checks behind membership and assignment.

use crate::database::{
    AdminRepository, ChurchRepository, CommunicationRepository, DatabasePool,
    DepartmentRepository, DiscipleshipRepository, GoalRepository, GroupRepository,
    MemberRepository, PrayerRepository, VolunteerRepository,
};
use crate::models::*;
use crate::utils::errors::ShepherdError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub churches: ChurchRepository,
    pub admins: AdminRepository,
    pub members: MemberRepository,
    pub departments: DepartmentRepository,
    pub groups: GroupRepository,
    pub goals: GoalRepository,
    pub discipleship: DiscipleshipRepository,
    pub prayers: PrayerRepository,
    pub volunteers: VolunteerRepository,
    pub communications: CommunicationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            churches: ChurchRepository::new(pool.clone()),
            admins: AdminRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            departments: DepartmentRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            goals: GoalRepository::new(pool.clone()),
            discipleship: DiscipleshipRepository::new(pool.clone()),
            prayers: PrayerRepository::new(pool.clone()),
            volunteers: VolunteerRepository::new(pool.clone()),
            communications: CommunicationRepository::new(pool),
        }
    }

    /// Add a member to a small group, honoring the group's capacity
    pub async fn join_group(
        &self,
        church_id: i64,
        group_id: i64,
        request: JoinGroupRequest,
    ) -> Result<GroupMember, ShepherdError> {
        let group = self
            .groups
            .find_by_id(church_id, group_id)
            .await?
            .ok_or(ShepherdError::GroupNotFound { group_id })?;

        if self
            .members
            .find_by_id(church_id, request.member_id)
            .await?
            .is_none()
        {
            return Err(ShepherdError::MemberNotFound {
                member_id: request.member_id,
            });
        }

        if self.groups.is_member(group_id, request.member_id).await? {
            return Err(ShepherdError::InvalidInput(
                "Member already belongs to this group".to_string(),
            ));
        }

        let current = self.groups.member_count(group_id).await?;
        if current >= group.max_capacity as i64 {
            return Err(ShepherdError::GroupFull { group_id });
        }

        self.groups.add_member(group_id, request).await
    }

    /// Add a member to a department, rejecting duplicates
    pub async fn add_department_member(
        &self,
        church_id: i64,
        department_id: i64,
        request: AddDepartmentMemberRequest,
    ) -> Result<DepartmentMember, ShepherdError> {
        if self
            .departments
            .find_by_id(church_id, department_id)
            .await?
            .is_none()
        {
            return Err(ShepherdError::DepartmentNotFound { department_id });
        }

        if self
            .members
            .find_by_id(church_id, request.member_id)
            .await?
            .is_none()
        {
            return Err(ShepherdError::MemberNotFound {
                member_id: request.member_id,
            });
        }

        if self
            .departments
            .is_member(department_id, request.member_id)
            .await?
        {
            return Err(ShepherdError::InvalidInput(
                "Member already belongs to this department".to_string(),
            ));
        }

        self.departments.add_member(department_id, request).await
    }

    /// Assign a disciple to a mentor, honoring the mentor's capacity
    pub async fn assign_mentor(
        &self,
        church_id: i64,
        disciple_id: i64,
        mentor_id: i64,
    ) -> Result<Disciple, ShepherdError> {
        let mentor = self
            .discipleship
            .find_mentor(church_id, mentor_id)
            .await?
            .ok_or_else(|| ShepherdError::InvalidInput(format!(
                "Mentor not found: {}",
                mentor_id
            )))?;

        if !mentor.is_active {
            return Err(ShepherdError::InvalidInput(format!(
                "Mentor {} is not active",
                mentor_id
            )));
        }

        let load = self.discipleship.mentor_load(mentor_id).await?;
        if load >= mentor.capacity as i64 {
            return Err(ShepherdError::MentorAtCapacity { mentor_id });
        }

        let update = UpdateDiscipleRequest {
            mentor_id: Some(mentor_id),
            ..Default::default()
        };

        self.discipleship
            .update_disciple(church_id, disciple_id, update)
            .await?
            .ok_or_else(|| ShepherdError::InvalidInput(format!(
                "Disciple not found: {}",
                disciple_id
            )))
    }
}
