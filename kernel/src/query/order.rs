use crate::database::Transaction;
use crate::entity::{Order, OrderId};
use crate::KernelError;

/// Read-back of stored orders. No route serves orders, so this only backs
/// store-level checks that an order and its items were written as placed.
#[async_trait::async_trait]
pub trait OrderQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError>;
}
