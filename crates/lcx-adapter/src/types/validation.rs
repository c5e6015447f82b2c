/*
[INPUT]:  Caller-supplied request payloads
[OUTPUT]: Validation errors raised before any network I/O
[POS]:    Data layer - payload precondition checks
[UPDATE]: When endpoint constraints change
*/

use rust_decimal::Decimal;

use super::enums::OrderType;
use super::requests::*;
use crate::http::{LcxError, Result};

/// Most order ids accepted by a single cancel-all request
pub const MAX_CANCEL_ALL_ORDERS: usize = 25;

/// Payload precondition check
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LcxError::validation(format!("'{field}' is required.")));
    }
    Ok(())
}

fn require_optional_text(field: &str, value: Option<&String>) -> Result<()> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

fn require_offset(offset: u32) -> Result<()> {
    if offset == 0 {
        return Err(LcxError::validation("'offset' is required."));
    }
    Ok(())
}

fn require_positive(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(LcxError::validation(format!(
            "'{field}' should be a positive number."
        )));
    }
    Ok(())
}

impl Validate for OrderBookPayload {
    fn validate(&self) -> Result<()> {
        require_text("pair", &self.pair)
    }
}

impl Validate for MarketKlinePayload {
    fn validate(&self) -> Result<()> {
        require_text("pair", &self.pair)?;
        require_text("resolution", &self.resolution)?;
        if self.from == 0 {
            return Err(LcxError::validation("'from' is required."));
        }
        if self.to == 0 {
            return Err(LcxError::validation("'to' is required."));
        }
        Ok(())
    }
}

impl Validate for TradesPayload {
    fn validate(&self) -> Result<()> {
        require_text("pair", &self.pair)?;
        require_offset(self.offset)
    }
}

impl Validate for MarketPairPayload {
    fn validate(&self) -> Result<()> {
        require_text("pair", &self.pair)
    }
}

impl Validate for MarketTickerPayload {
    fn validate(&self) -> Result<()> {
        require_text("pair", &self.pair)
    }
}

impl Validate for OrderCreatePayload {
    fn validate(&self) -> Result<()> {
        require_text("pair", &self.pair)?;
        require_positive("amount", self.amount)?;
        if let Some(price) = self.price {
            require_positive("price", price)?;
        }
        if let Some(client_order_id) = &self.client_order_id {
            require_text("clientOrderId", client_order_id)?;
        }
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(LcxError::validation(
                "'price' is required for limit orders and should be a positive number.",
            ));
        }
        Ok(())
    }
}

impl Validate for OrderModifyPayload {
    fn validate(&self) -> Result<()> {
        require_text("orderId", &self.order_id)?;
        require_positive("amount", self.amount)?;
        require_positive("price", self.price)
    }
}

impl Validate for OrderCancelPayload {
    fn validate(&self) -> Result<()> {
        require_text("orderId", &self.order_id)
    }
}

impl Validate for OrderCancelAllPayload {
    fn validate(&self) -> Result<()> {
        if self.order_ids.is_empty() {
            return Err(LcxError::validation(
                "'orderIds' must be a non-empty array.",
            ));
        }
        if self.order_ids.len() > MAX_CANCEL_ALL_ORDERS {
            return Err(LcxError::validation(format!(
                "You can cancel a maximum of {MAX_CANCEL_ALL_ORDERS} orders at a time."
            )));
        }
        for order_id in &self.order_ids {
            require_text("orderIds", order_id)?;
        }
        Ok(())
    }
}

impl Validate for OpenOrdersPayload {
    fn validate(&self) -> Result<()> {
        require_optional_text("pair", self.pair.as_ref())?;
        require_offset(self.offset)
    }
}

impl Validate for OrderDetailsPayload {
    fn validate(&self) -> Result<()> {
        require_text("orderId", &self.order_id)
    }
}

impl Validate for OrderHistoryPayload {
    fn validate(&self) -> Result<()> {
        require_optional_text("pair", self.pair.as_ref())?;
        require_offset(self.offset)
    }
}

impl Validate for TradeHistoryPayload {
    fn validate(&self) -> Result<()> {
        require_optional_text("pair", self.pair.as_ref())?;
        require_offset(self.offset)
    }
}

impl Validate for CoinBalancePayload {
    fn validate(&self) -> Result<()> {
        require_text("coin", &self.coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderSide;
    use rstest::rstest;

    fn cancel_all(count: usize) -> OrderCancelAllPayload {
        OrderCancelAllPayload {
            order_ids: (0..count).map(|i| format!("order-{i}")).collect(),
        }
    }

    fn create(order_type: OrderType, amount: Decimal, price: Option<Decimal>) -> OrderCreatePayload {
        OrderCreatePayload {
            pair: "LCX/USDC".to_string(),
            amount,
            price,
            order_type,
            side: OrderSide::Buy,
            client_order_id: None,
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(12, true)]
    #[case(25, true)]
    #[case(26, false)]
    fn test_cancel_all_bounds(#[case] count: usize, #[case] accepted: bool) {
        assert_eq!(cancel_all(count).validate().is_ok(), accepted);
    }

    #[test]
    fn test_cancel_all_too_many_message() {
        let err = cancel_all(26).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation Error: You can cancel a maximum of 25 orders at a time."
        );
    }

    #[rstest]
    #[case(OrderType::Limit, Decimal::new(10, 0), Some(Decimal::new(4, 3)), true)]
    #[case(OrderType::Limit, Decimal::new(10, 0), None, false)]
    #[case(OrderType::Market, Decimal::new(10, 0), None, true)]
    #[case(OrderType::Market, Decimal::ZERO, None, false)]
    #[case(OrderType::Market, Decimal::new(-1, 0), None, false)]
    #[case(OrderType::Limit, Decimal::new(10, 0), Some(Decimal::ZERO), false)]
    fn test_order_create_rules(
        #[case] order_type: OrderType,
        #[case] amount: Decimal,
        #[case] price: Option<Decimal>,
        #[case] accepted: bool,
    ) {
        assert_eq!(create(order_type, amount, price).validate().is_ok(), accepted);
    }

    #[test]
    fn test_required_pair() {
        let err = OrderBookPayload { pair: String::new() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation Error: 'pair' is required.");
    }

    #[test]
    fn test_zero_offset_rejected() {
        let payload = OpenOrdersPayload {
            offset: 0,
            ..Default::default()
        };
        assert!(matches!(payload.validate(), Err(LcxError::Validation(_))));
        let payload = OpenOrdersPayload {
            offset: 1,
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_kline_requires_range() {
        let payload = MarketKlinePayload {
            pair: "LCX/USDC".to_string(),
            resolution: "1D".to_string(),
            from: 1_700_000_000,
            to: 0,
        };
        assert_eq!(
            payload.validate().unwrap_err().to_string(),
            "Validation Error: 'to' is required."
        );
    }

    #[test]
    fn test_modify_requires_positive_price() {
        let payload = OrderModifyPayload {
            order_id: "123".to_string(),
            amount: Decimal::new(10, 0),
            price: Decimal::ZERO,
        };
        assert!(payload.validate().is_err());
    }
}
