//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod admin;
pub mod church;
pub mod common;
pub mod communication;
pub mod department;
pub mod discipleship;
pub mod goal;
pub mod group;
pub mod member;
pub mod prayer;
pub mod volunteer;

// Re-export commonly used models
pub use admin::{
    Admin, AdminCreated, AdminRole, CreateAdminRequest, LoginRequest, LoginResponse,
    UpdateAdminRequest,
};
pub use church::{
    Church, ChurchRegistration, RegisterChurchRequest, UpdateChurchRequest,
    UpdateChurchSettingsRequest,
};
pub use common::{PageMeta, Paged, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use communication::{
    Announcement, Audience, DeliveryChannel, DeliveryStats, DeliveryStatus, Message,
    PublishAnnouncementRequest, SendMessageRequest,
};
pub use department::{
    AddDepartmentMemberRequest, CreateDepartmentRequest, Department, DepartmentMember,
    DepartmentStats, RecordExpenseRequest, UpdateDepartmentRequest,
};
pub use discipleship::{
    AssignMentorRequest, CreateDiscipleRequest, CreateMentorRequest, Disciple, DiscipleStatus,
    DiscipleshipStage, Mentor, UpdateDiscipleRequest, UpdateMentorRequest,
};
pub use goal::{
    CreateGoalRequest, Goal, GoalFilter, GoalOwner, GoalPriority, GoalStatus, UpdateGoalRequest,
};
pub use group::{
    CreateGroupRequest, GroupMember, GroupWithOccupancy, JoinGroupRequest, SmallGroup,
    UpdateGroupRequest,
};
pub use member::{
    CreateMemberRequest, Member, MemberFilter, MembershipStatus, UpdateMemberRequest,
};
pub use prayer::{
    CreatePrayerRequest, PrayerCategory, PrayerFilter, PrayerRequest, PrayerStatus,
    UpdatePrayerRequest, UpdatePrayerStatusRequest,
};
pub use volunteer::{
    CreateVolunteerRequest, UpdateVolunteerRequest, Volunteer, VolunteerFilter, VolunteerStatus,
};
