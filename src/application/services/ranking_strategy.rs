//! # Ranking Strategy
//!
//! Strategies for ordering collected remittance quotes.
//!
//! Every strategy is a stable sort: quotes that score the same keep the
//! order they were handed in, which for the hub is provider registration
//! order.

use crate::domain::entities::RemittanceQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quote with its ranking information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedQuote {
    /// The quote being ranked.
    pub quote: RemittanceQuote,
    /// The rank (1 = best).
    pub rank: usize,
    /// The score used for ranking (higher = better).
    pub score: Decimal,
}

impl RankedQuote {
    /// Creates a new ranked quote.
    #[must_use]
    pub fn new(quote: RemittanceQuote, rank: usize, score: Decimal) -> Self {
        Self { quote, rank, score }
    }

    /// Returns true if this quote is the best (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }

    /// Unwraps the ranked quote into the quote itself.
    #[must_use]
    pub fn into_quote(self) -> RemittanceQuote {
        self.quote
    }
}

impl fmt::Display for RankedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} score={} {}", self.rank, self.score, self.quote)
    }
}

/// Trait for ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Scores a single quote. Higher is better.
    fn score(&self, quote: &RemittanceQuote) -> Decimal;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;

    /// Ranks the given quotes, best first.
    ///
    /// The default implementation sorts by [`score`](Self::score) in
    /// descending order and keeps input order between equal scores.
    fn rank(&self, quotes: Vec<RemittanceQuote>) -> Vec<RankedQuote> {
        let mut scored: Vec<(Decimal, RemittanceQuote)> =
            quotes.into_iter().map(|q| (self.score(&q), q)).collect();

        // slice::sort_by is stable
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (score, quote))| RankedQuote::new(quote, i + 1, score))
            .collect()
    }
}

/// Ranks by total cost to the sender, cheapest first.
///
/// The score is the negated total cost so that "higher is better" holds
/// across strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestTotalCostStrategy;

impl LowestTotalCostStrategy {
    /// Creates a new lowest total cost strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for LowestTotalCostStrategy {
    fn score(&self, quote: &RemittanceQuote) -> Decimal {
        -quote.total_cost().amount()
    }

    fn name(&self) -> &'static str {
        "LowestTotalCost"
    }
}

/// Ranks by the amount the recipient gets, largest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestReceivedAmountStrategy;

impl BestReceivedAmountStrategy {
    /// Creates a new best received amount strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for BestReceivedAmountStrategy {
    fn score(&self, quote: &RemittanceQuote) -> Decimal {
        quote.received_amount().amount()
    }

    fn name(&self) -> &'static str {
        "BestReceivedAmount"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::QuoteBuilder;
    use crate::domain::value_objects::{Currency, Money, ProviderName, Timestamp};

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn quote(provider: &str, fee: Decimal, rate: Decimal) -> RemittanceQuote {
        QuoteBuilder::new(
            ProviderName::new(provider),
            Money::new(d("1000"), Currency::USD),
            Money::new(fee, Currency::USD),
            rate,
            Currency::PHP,
            Timestamp::now().add_secs(600),
        )
        .try_build()
        .unwrap()
    }

    fn providers(ranked: &[RankedQuote]) -> Vec<&str> {
        ranked.iter().map(|r| r.quote.provider().as_str()).collect()
    }

    mod lowest_total_cost {
        use super::*;

        #[test]
        fn cheapest_first() {
            let ranked = LowestTotalCostStrategy.rank(vec![
                quote("Wise", d("15"), d("1.2")),
                quote("Remitly", d("20"), d("1.15")),
                quote("WorldRemit", d("5.99"), d("1.18")),
            ]);

            assert_eq!(providers(&ranked), ["WorldRemit", "Wise", "Remitly"]);
            assert!(ranked[0].is_best());
            assert_eq!(ranked[0].score, d("-1005.99"));
            assert_eq!(ranked[2].rank, 3);
        }

        #[test]
        fn ties_keep_input_order() {
            let ranked = LowestTotalCostStrategy.rank(vec![
                quote("B", d("10"), d("1.1")),
                quote("A", d("10"), d("1.3")),
                quote("C", d("5"), d("1.0")),
                quote("D", d("10"), d("1.2")),
            ]);

            assert_eq!(providers(&ranked), ["C", "B", "A", "D"]);
        }

        #[test]
        fn empty_input() {
            assert!(LowestTotalCostStrategy.rank(Vec::new()).is_empty());
        }
    }

    mod best_received_amount {
        use super::*;

        #[test]
        fn largest_payout_first() {
            let ranked = BestReceivedAmountStrategy.rank(vec![
                quote("Wise", d("15"), d("1.2")),
                quote("Remitly", d("20"), d("1.15")),
                quote("WorldRemit", d("5.99"), d("1.18")),
            ]);

            assert_eq!(providers(&ranked), ["Wise", "WorldRemit", "Remitly"]);
            assert_eq!(ranked[0].score, d("1200"));
        }
    }

    #[test]
    fn strategy_names() {
        assert_eq!(LowestTotalCostStrategy::new().name(), "LowestTotalCost");
        assert_eq!(BestReceivedAmountStrategy::new().name(), "BestReceivedAmount");
    }
}
