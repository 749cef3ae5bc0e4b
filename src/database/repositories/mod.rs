//! Repository implementations for database access

pub mod admin;
pub mod church;
pub mod communication;
pub mod department;
pub mod discipleship;
pub mod goal;
pub mod group;
pub mod member;
pub mod prayer;
pub mod volunteer;

pub use admin::AdminRepository;
pub use church::ChurchRepository;
pub use communication::CommunicationRepository;
pub use department::DepartmentRepository;
pub use discipleship::DiscipleshipRepository;
pub use goal::GoalRepository;
pub use group::GroupRepository;
pub use member::MemberRepository;
pub use prayer::PrayerRepository;
pub use volunteer::VolunteerRepository;
