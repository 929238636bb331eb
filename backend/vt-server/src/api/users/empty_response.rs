use serde::Serialize;

/// Serializes as `{}`
#[derive(Debug, Default, Serialize)]
pub struct EmptyResponse {}
