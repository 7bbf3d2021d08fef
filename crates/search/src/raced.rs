use std::future::Future;
use std::time::Duration;

/// Race `op` against a wall-clock budget.
///
/// `Ok(Some(value))` when `op` wins, `Ok(None)` when the budget elapses
/// first: the losing `op` future is dropped, which cancels it and every
/// task group scoped inside it. A timeout is deliberately not an error;
/// `Err` only surfaces a failure `op` itself produced before the deadline.
pub async fn raced<T, E, F>(budget: Duration, op: F) -> Result<Option<T>, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(budget, op).await {
        Ok(Ok(value)) => Ok(Some(value)),
        Ok(Err(e)) => Err(e),
        Err(_elapsed) => Ok(None),
    }
}
