//! Completion samplers: request shaping, fallback and retry policy.

mod requester;
mod responses;

pub use requester::{
    CompletionSampler, ResponseMetadata, SamplerConfig, SamplerResponse, BAD_REQUEST_RESPONSE,
    RETRIES_EXHAUSTED_RESPONSE,
};
pub use responses::ResponsesSampler;
