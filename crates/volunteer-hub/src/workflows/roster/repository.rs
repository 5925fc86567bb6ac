use super::domain::{Member, MemberId};
use crate::storage::RepositoryError;

/// Storage abstraction for the member roster.
///
/// `list` must return members in roster order; the matcher breaks score ties by it.
pub trait MemberRepository: Send + Sync {
    fn insert(&self, member: Member) -> Result<Member, RepositoryError>;
    fn update(&self, member: Member) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError>;
    fn find_by_username(&self, username: &str) -> Result<Option<Member>, RepositoryError>;
    fn list(&self) -> Result<Vec<Member>, RepositoryError>;
    fn remove(&self, id: &MemberId) -> Result<Member, RepositoryError>;
}
