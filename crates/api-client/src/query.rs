use core_types::{BetCategory, TimeWindow};
use serde::Serialize;

/// One page request against a bet stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BetsQuery {
    pub category: BetCategory,
    pub window: TimeWindow,
    /// Page size.
    pub first: u32,
    /// Offset of the first record in the page.
    pub skip: u32,
}

impl BetsQuery {
    /// The subgraph entity backing this query's stream.
    pub fn entity(&self) -> &'static str {
        entity_name(self.category)
    }

    /// Renders the GraphQL document for this query's stream.
    pub fn document(&self) -> String {
        format!(
            "query Bets($from: BigInt!, $to: BigInt!, $first: Int!, $skip: Int!) {{
  {entity}(
    where: {{
      status: Resolved,
      _isFreebet: false,
      resolvedBlockTimestamp_gte: $from,
      resolvedBlockTimestamp_lte: $to
    }},
    first: $first,
    skip: $skip
  ) {{
    amount
    odds
    result
  }}
}}",
            entity = self.entity()
        )
    }

    /// The JSON body POSTed to the subgraph.
    pub fn to_request(&self) -> GraphQlRequest {
        GraphQlRequest {
            query: self.document(),
            variables: Variables {
                // BigInt variables travel as strings.
                from: self.window.from().to_string(),
                to: self.window.to().to_string(),
                first: self.first,
                skip: self.skip,
            },
        }
    }
}

pub fn entity_name(category: BetCategory) -> &'static str {
    match category {
        BetCategory::Standard => "bets",
        BetCategory::Live => "liveBets",
    }
}

#[derive(Debug, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Variables,
}

#[derive(Debug, Serialize)]
pub struct Variables {
    pub from: String,
    pub to: String,
    pub first: u32,
    pub skip: u32,
}
