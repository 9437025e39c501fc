//! End-to-end tests for the caption overlay:
//! - Caption discovery and listener attachment
//! - Hover → translate → tooltip → auto-dismiss
//! - Supersession of in-flight hovers
//! - Storage and network failure paths

pub mod e2e;
