//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`crate::store::PgStore`]
//! delegates to these; nothing above the store layer touches them.

pub mod activity_repo;
pub mod asset_repo;
pub mod calendar_repo;
pub mod campaign_repo;
pub mod collection_repo;
pub mod creator_repo;
pub mod department_repo;
pub mod project_repo;
pub mod role_repo;
pub mod session_repo;
pub mod task_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use asset_repo::AssetRepo;
pub use calendar_repo::CalendarRepo;
pub use campaign_repo::CampaignRepo;
pub use collection_repo::CollectionRepo;
pub use creator_repo::CreatorRepo;
pub use department_repo::DepartmentRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
