// Domain layer: DTOs mirroring the upstream JSON, built per-request and
// discarded after rendering.

pub mod glossary;
pub mod states;
pub mod term;
pub mod trial;
