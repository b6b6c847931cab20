// Handlers are split by security tier:
// public (no auth) and protected (bearer token required).

pub mod protected;
pub mod public;
