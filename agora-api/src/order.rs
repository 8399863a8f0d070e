use std::str::FromStr;

use crate::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum OrderType {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Order {
    CreatedAt(OrderType),
    /// Upvotes minus downvotes
    Score(OrderType),
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Order, Error> {
        match s {
            "created-asc" => Ok(Order::CreatedAt(OrderType::Asc)),
            "created-desc" => Ok(Order::CreatedAt(OrderType::Desc)),
            "score-asc" => Ok(Order::Score(OrderType::Asc)),
            "score-desc" => Ok(Order::Score(OrderType::Desc)),
            _ => Err(Error::UnknownOrder(String::from(s))),
        }
    }
}

/// How a discussion is laid out: one order for top-level comments, another
/// for every reply list below them
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ThreadOrder {
    pub top_level: Order,
    pub replies: Order,
}

impl Default for ThreadOrder {
    fn default() -> ThreadOrder {
        ThreadOrder {
            top_level: Order::CreatedAt(OrderType::Desc),
            replies: Order::CreatedAt(OrderType::Asc),
        }
    }
}
