/// Neighbor bitmask and the category capability
pub mod mask;
/// Ordered first-match rule table
pub mod resolver;
