// Domain layer: entities, invariants, aggregates and the storage port.

pub mod model;
pub mod ports;
pub mod rules;
pub mod stats;
