//! Role-specific dashboard summary and admin analytics.

mod analytics;
pub mod router;
pub mod service;
mod snapshot;
mod summary;


pub use analytics::{Analytics, DomainCount};
pub use router::dashboard_router;
pub use service::{DashboardError, DashboardService};
pub use snapshot::Snapshot;
pub use summary::{
    AdminView, BirthdayEntry, DashboardSummary, DashboardTotals, IdeaDigest, RoleView,
    VolunteerView,
};
