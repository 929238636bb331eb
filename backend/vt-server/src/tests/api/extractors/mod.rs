mod bearer_token;
mod json_body;
mod token_delivery;
