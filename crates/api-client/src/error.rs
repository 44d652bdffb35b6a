use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the subgraph request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The subgraph returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("The subgraph rejected the query: {0}")]
    GraphQl(String),

    #[error("Failed to deserialize the subgraph response: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid data format from subgraph: {0}")]
    InvalidData(String),

    #[error("Pagination stopped after {max_pages} full pages without reaching the end")]
    PageLimitExceeded { max_pages: u32 },
}
