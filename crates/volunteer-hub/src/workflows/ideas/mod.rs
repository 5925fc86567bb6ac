//! Idea box: member suggestions, admin review, and upvotes.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{Idea, IdeaDraft, IdeaId, IdeaReview, IdeaStatus};
pub use repository::IdeaRepository;
pub use router::idea_router;
pub use service::{IdeaService, IdeaServiceError};
