use crate::TaskflowResult;

/// Storage seam for one persisted aggregate (a board snapshot, in practice).
///
/// The board engine never performs I/O itself; callers load a value through
/// this trait, mutate it in memory, and write the committed state back.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait Repository<T: 'static> {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> TaskflowResult<Option<T>>;
    fn save(&self, entity: &T) -> TaskflowResult<()>;
}
