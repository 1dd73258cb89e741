/// What a panel can see of a remote read.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T, E> {
    /// No data yet
    Pending,
    /// Last fetch failed; stays failed until the key is invalidated
    Failed(E),
    /// Payload from the last successful fetch
    Settled(T),
}

impl<T, E> QueryState<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Settled(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U, E> {
        match self {
            QueryState::Pending => QueryState::Pending,
            QueryState::Failed(err) => QueryState::Failed(err),
            QueryState::Settled(data) => QueryState::Settled(f(data)),
        }
    }
}

impl<T, E> Default for QueryState<T, E> {
    fn default() -> Self {
        QueryState::Pending
    }
}

impl<T, E> From<Result<T, E>> for QueryState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => QueryState::Settled(data),
            Err(err) => QueryState::Failed(err),
        }
    }
}
