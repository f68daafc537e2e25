/// Movement-cost payloads and cost shading
pub mod movement;
/// Shared terrain definitions and autotiled terrain payloads
pub mod terrain;
