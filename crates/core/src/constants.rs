/// Value sent in `X-Requested-With` when calling sibling festival services.
pub const GATEWAY_CALLER_ID: &str = "Gateway-Service";

/// Region used when a caller does not send one.
pub const DEFAULT_REGION: &str = "EU";
