//! Bet submission boundary.

use crate::error::{Error, Result};
use crate::state::{BetRecord, checked_total};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Acknowledgement of a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Batch identifier.
    pub batch_id: Uuid,
    /// Number of bets in the batch.
    pub count: usize,
    /// Sum of all amounts.
    pub total: Decimal,
    /// When the batch was handed off.
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    /// Build a receipt for `bets`.
    ///
    /// An empty batch, or one whose total does not fit in a `Decimal`, is refused.
    pub fn for_bets(bets: &[BetRecord]) -> Result<Self> {
        if bets.is_empty() {
            return Err(Error::submission("no bets to place"));
        }
        let total = checked_total(bets)
            .ok_or_else(|| Error::submission("total stake is too large"))?;

        Ok(Self {
            batch_id: Uuid::new_v4(),
            count: bets.len(),
            total,
            submitted_at: Utc::now(),
        })
    }
}

/// Execution backend that receives the whole betslip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BetSubmitter: Send + Sync {
    /// Hand off `bets` for execution.
    async fn submit(&self, bets: &[BetRecord]) -> Result<SubmissionReceipt>;
}

/// Submitter that only records the batch in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmitter;

#[async_trait]
impl BetSubmitter for LoggingSubmitter {
    async fn submit(&self, bets: &[BetRecord]) -> Result<SubmissionReceipt> {
        let receipt = SubmissionReceipt::for_bets(bets)?;
        for bet in bets {
            tracing::info!(
                batch = %receipt.batch_id,
                market = %bet.id,
                side = %bet.side,
                amount = %bet.amount,
                "Placing bet"
            );
        }
        tracing::info!(
            batch = %receipt.batch_id,
            count = receipt.count,
            total = %receipt.total,
            "Bets handed off"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BetSide;
    use rust_decimal_macros::dec;

    fn bet(id: &str, amount: Decimal) -> BetRecord {
        BetRecord {
            id: id.to_string(),
            question: format!("Q{}", id),
            side: BetSide::Yes,
            amount,
        }
    }

    #[test]
    fn test_logging_submitter_receipt() {
        let bets = vec![bet("1", dec!(0.1)), bet("2", dec!(0.25))];

        let receipt = tokio_test::block_on(LoggingSubmitter.submit(&bets)).unwrap();
        assert_eq!(receipt.count, 2);
        assert_eq!(receipt.total, dec!(0.35));
    }

    #[test]
    fn test_empty_batch_is_refused() {
        let result = tokio_test::block_on(LoggingSubmitter.submit(&[]));
        assert!(matches!(result, Err(Error::Submission(_))));
    }

    #[test]
    fn test_overflowing_total_is_refused() {
        let bets = vec![bet("1", Decimal::MAX), bet("2", Decimal::MAX)];
        let result = tokio_test::block_on(LoggingSubmitter.submit(&bets));
        assert!(matches!(result, Err(Error::Submission(_))));
    }
}
