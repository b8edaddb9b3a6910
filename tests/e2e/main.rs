//! End-to-end scenarios for tabkeep.

mod harness;
mod scenarios;
