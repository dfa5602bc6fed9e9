use uuid::Uuid;

/// Sample Order entity for testing
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub price: i64,
}

impl Order {
    pub fn new(price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            price,
        }
    }
}

/// Published once an order's transaction has committed
#[derive(Debug, Clone, PartialEq)]
pub struct AfterOrderEvent {
    pub order: Order,
}
